use crate::ayanamsa::{ayanamsa, is_extreme_year};
use crate::chart::bodies::resolve_bodies;
use crate::chart::describe;
use crate::chart::error::ChartError;
use crate::chart::houses::resolve_houses;
use crate::chart::settings::{AyanamsaYear, CalculationSettings, ChartConfig};
use crate::chart::types::{Advisory, BirthData, BodyPosition, NatalChart};
use crate::ephemeris::{CalendarConvention, EphemerisProvider};
use crate::time::to_utc;
use chrono::Datelike;

/// Assembles natal charts from one ephemeris provider.
///
/// The provider is owned for the engine's lifetime and closed exactly once,
/// by [`ChartEngine::shutdown`] or on drop. Chart computation borrows the
/// engine mutably, so calls against one provider never overlap.
pub struct ChartEngine<P: EphemerisProvider> {
    provider: Option<P>,
    config: ChartConfig,
}

impl<P: EphemerisProvider> ChartEngine<P> {
    pub fn new(provider: P, config: ChartConfig) -> Self {
        Self {
            provider: Some(provider),
            config,
        }
    }

    /// An engine with no provider; every computation fails until one is attached.
    pub fn without_provider(config: ChartConfig) -> Self {
        Self {
            provider: None,
            config,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replace the chart preferences. Takes effect on the next request.
    pub fn set_config(&mut self, config: ChartConfig) {
        self.config = config;
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Settings for a request made now.
    pub fn resolve_settings(&self, birth: &BirthData) -> CalculationSettings {
        CalculationSettings::from_config(&self.config, birth, current_year())
    }

    /// Compute a chart with settings resolved from the engine's config and
    /// the current calendar year.
    pub fn compute_chart(&mut self, birth: &BirthData) -> Result<NatalChart, ChartError> {
        if self.provider.is_none() {
            log::error!("Chart aborted: no ephemeris provider");
            return Err(ChartError::ProviderUnavailable);
        }
        let settings = self.resolve_settings(birth);
        self.compute_chart_with(birth, settings)
    }

    /// Compute a chart with explicit settings.
    pub fn compute_chart_with(
        &mut self,
        birth: &BirthData,
        settings: CalculationSettings,
    ) -> Result<NatalChart, ChartError> {
        let provider = match self.provider.as_mut() {
            Some(provider) => provider,
            None => {
                log::error!("Chart aborted: no ephemeris provider");
                return Err(ChartError::ProviderUnavailable);
            }
        };
        if let Err(e) = birth.validate() {
            log::error!("Chart aborted: {}", e);
            return Err(e);
        }

        log::info!(
            "Computing chart for {} (UTC{:+}) at {:.4}, {:.4}: {}",
            birth.local,
            birth.utc_offset_hours,
            birth.latitude,
            birth.longitude,
            describe::describe_calculation_system(&settings)
        );

        let mut advisories = Vec::new();
        if is_extreme_year(settings.ayanamsa_year) {
            advisories.push(Advisory::AyanamsaExtremeYear {
                year: settings.ayanamsa_year,
            });
        }

        let utc = to_utc(birth).inspect_err(|e| log::error!("Chart aborted: {}", e))?;
        let jd = provider.day_number(utc.year, utc.month, utc.day, utc.hour, CalendarConvention::Gregorian);

        let range = provider.supported_range();
        if !range.contains(&jd) {
            log::warn!(
                "Day number {} is outside the ephemeris range {}..={}; accuracy is reduced",
                jd,
                range.start(),
                range.end()
            );
            advisories.push(Advisory::DayNumberOutOfRange {
                julian_day: jd,
                valid_from: *range.start(),
                valid_to: *range.end(),
            });
        }

        let bodies = resolve_bodies(&mut *provider, jd, &settings);
        advisories.extend(bodies.failures.into_iter().map(|f| Advisory::BodyOmitted {
            body: f.body,
            reason: f.reason,
        }));

        let houses = resolve_houses(&mut *provider, jd, birth, &settings)
            .inspect_err(|e| log::error!("Chart aborted: {}", e))?;

        log::info!(
            "Chart complete: {} bodies, {} advisories",
            bodies.positions.len(),
            advisories.len()
        );

        Ok(NatalChart::new(
            birth.clone(),
            utc,
            jd,
            settings,
            bodies.positions,
            houses.cusps,
            houses.ascendant,
            houses.midheaven,
            advisories,
        ))
    }

    /// Zodiac, ayanamsa and house system a request made now would use.
    ///
    /// A birth-year ayanamsa anchor has no birth to read here and is shown
    /// with the current year's value.
    pub fn describe_calculation_system(&self) -> String {
        let year = match self.config.ayanamsa_year {
            AyanamsaYear::Fixed(year) => year,
            AyanamsaYear::Current | AyanamsaYear::Birth => current_year(),
        };
        let settings = CalculationSettings {
            zodiac: self.config.zodiac,
            house_system: self.config.house_system,
            ayanamsa_year: year,
            ayanamsa: ayanamsa(year),
        };
        describe::describe_calculation_system(&settings)
    }

    pub fn describe_body(&self, position: &BodyPosition) -> String {
        describe::describe_body(position)
    }

    /// Release the provider. Later computations fail with
    /// [`ChartError::ProviderUnavailable`].
    pub fn shutdown(&mut self) {
        if let Some(mut provider) = self.provider.take() {
            provider.close();
            log::debug!("Ephemeris provider closed");
        }
    }
}

impl<P: EphemerisProvider> Drop for ChartEngine<P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}
