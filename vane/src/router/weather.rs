use vane_core::{Capability, Coordinates, VaneError, WeatherSnapshot};

use crate::Vane;

impl Vane {
    /// Fetch current conditions and the daily forecast at `coords`.
    ///
    /// Weather connectors are tried in registration order until one succeeds.
    ///
    /// # Errors
    /// `Exhausted` when every weather connector failed, `Unsupported` when none
    /// is registered.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "vane::router", skip(self), fields(coords = %coords))
    )]
    pub async fn weather(&self, coords: Coordinates) -> Result<WeatherSnapshot, VaneError> {
        let what = format!("weather at {coords}");
        self.resolve(Capability::Weather, &what, self.ordered(None), |c| {
            c.as_weather_provider()?;
            Some(async move {
                match c.as_weather_provider() {
                    Some(p) => p.weather(coords).await,
                    None => Err(VaneError::unsupported(Capability::Weather.as_str())),
                }
            })
        })
        .await
    }
}
