use crate::chart::types::{BirthChart, BodyPlacement, ChartRequest, ChartWithHouses};
use crate::ephemeris::{Body, EphemerisError, EphemerisProvider, PositionSampler};
use crate::houses::{assign_houses, place_in_houses};
use crate::time::{resolve, TimeError};
use crate::zodiac::map_longitude;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("Chart has no Ascendant to anchor the houses")]
    MissingAscendant,
}

/// Builds birth charts from a date, time, zone and observer.
///
/// Either a complete chart is returned or an error; a failure on any single
/// body fails the whole chart.
pub struct BirthChartAssembler<P> {
    provider: P,
}

impl<P: EphemerisProvider> BirthChartAssembler<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Flat list of placements for every body in [`Body::CHART`].
    pub fn generate_birth_chart(&self, request: &ChartRequest) -> Result<BirthChart, ChartError> {
        let moment = resolve(&request.date, &request.options)?;
        let sampler = PositionSampler::new(&self.provider);

        let placements = Body::CHART
            .iter()
            .map(|&body| {
                let sample =
                    sampler.sample_with_retrograde(moment.instant, &moment.observer, body)?;
                Ok(BodyPlacement {
                    body,
                    ecliptic_longitude: sample.longitude,
                    placement: map_longitude(sample.longitude),
                    retrograde: sample.retrograde,
                    house: None,
                })
            })
            .collect::<Result<Vec<_>, ChartError>>()?;

        log::debug!(
            "chart for {} at ({:.4}, {:.4}): {} placements",
            moment.instant.to_rfc3339(),
            moment.observer.latitude,
            moment.observer.longitude,
            placements.len()
        );

        Ok(BirthChart {
            instant: moment.instant,
            observer: moment.observer,
            placements,
        })
    }

    /// Chart plus whole-sign houses anchored on the Ascendant.
    pub fn generate_birth_chart_with_houses(
        &self,
        request: &ChartRequest,
    ) -> Result<ChartWithHouses, ChartError> {
        let chart = self.generate_birth_chart(request)?;
        let ascendant = chart.body(Body::Ascendant).ok_or(ChartError::MissingAscendant)?;
        let houses = assign_houses(ascendant.placement.sign);
        let planets = place_in_houses(&houses, &chart.placements);

        Ok(ChartWithHouses {
            instant: chart.instant,
            observer: chart.observer,
            planets,
            houses,
        })
    }
}
