use netatmo_station::{NetatmoStation, NetatmoStationError, StationSensor};
use std::env;

#[tokio::main]
async fn main() -> Result<(), NetatmoStationError> {
    env_logger::init();

    let client_id = env::var("NETATMO_CLIENT_ID")
        .expect("Environment variable 'NETATMO_CLIENT_ID' is not set.");
    let client_secret = env::var("NETATMO_CLIENT_SECRET")
        .expect("Environment variable 'NETATMO_CLIENT_SECRET' is not set.");

    let station = NetatmoStation::builder()
        .client_id(client_id)
        .client_secret(client_secret)
        .build()
        .await?;

    let mut sensor = StationSensor::initialize(station).await?;
    let mut ticker = tokio::time::interval(sensor.update_interval());
    // The first interval tick completes immediately.
    ticker.tick().await;

    loop {
        match sensor.state() {
            Some(temperature) => {
                println!("{}: {} °C", sensor.name(), temperature);
                println!("{:#?}", sensor.reading().unwrap());
            }
            None => println!("{}: no data this tick", sensor.name()),
        }
        ticker.tick().await;
        sensor.update().await;
    }
}
