//! Translation between our forecast vocabulary and the weather service's

use std::convert::Infallible;

use super::weather::{self, WeatherService};
use super::{Day, Forecast, Forecaster, Region};

/// Exposes a `WeatherService` as a `Forecaster`
#[derive(Debug)]
pub struct WeatherServiceAdapter<S = WeatherService> {
    service: S,
}

impl<S> WeatherServiceAdapter<S>
where
    S: std::borrow::Borrow<WeatherService>,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The wrapped service
    pub fn service(&self) -> &WeatherService {
        self.service.borrow()
    }
}

impl<S> Forecaster for WeatherServiceAdapter<S>
where
    S: std::borrow::Borrow<WeatherService>,
{
    type Error = Infallible;

    fn forecast_for(&self, region: Region, day: Day) -> Result<Forecast, Self::Error> {
        let upstream = self
            .service
            .borrow()
            .forecast_for(adapt_region(region), adapt_day(day));
        Ok(adapt_forecast(upstream))
    }
}

fn adapt_region(region: Region) -> weather::Region {
    match region {
        Region::Birmingham => weather::Region::Birmingham,
        Region::Edinburgh => weather::Region::Edinburgh,
        Region::Glasgow => weather::Region::Glasgow,
        Region::London => weather::Region::London,
        Region::Manchester => weather::Region::Manchester,
        Region::NorthEngland => weather::Region::NorthEngland,
        Region::SouthWestEngland => weather::Region::SouthWestEngland,
        Region::SouthEastEngland => weather::Region::SouthEastEngland,
        Region::Wales => weather::Region::Wales,
    }
}

fn adapt_day(day: Day) -> weather::Day {
    match day {
        Day::Monday => weather::Day::Monday,
        Day::Tuesday => weather::Day::Tuesday,
        Day::Wednesday => weather::Day::Wednesday,
        Day::Thursday => weather::Day::Thursday,
        Day::Friday => weather::Day::Friday,
        Day::Saturday => weather::Day::Saturday,
        Day::Sunday => weather::Day::Sunday,
    }
}

fn adapt_forecast(forecast: weather::Forecast) -> Forecast {
    Forecast {
        summary: forecast.outlook,
        temperature: forecast.temperature_c,
    }
}
