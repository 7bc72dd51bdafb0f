use sysinfo::Components;

use crate::core::metrics::{SensorRange, TemperatureSensor};
use crate::error::PlatformError;

/// Labels that usually identify the processor die, in preference order
const DIE_LABELS: [&str; 5] = ["package", "tctl", "cpu", "core", "soc"];

/// Die temperature read through sysinfo's hardware components
#[derive(Default)]
pub struct ComponentTemperatureSensor {
    range: SensorRange,
    components: Option<Components>,
}

impl ComponentTemperatureSensor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemperatureSensor for ComponentTemperatureSensor {
    fn configure(&mut self, range: SensorRange) -> Result<(), PlatformError> {
        if range.min_celsius >= range.max_celsius {
            return Err(PlatformError::Failed(-1));
        }
        self.range = range;
        Ok(())
    }

    fn start(&mut self) -> Result<(), PlatformError> {
        let components = Components::new_with_refreshed_list();
        if components.iter().all(|c| c.temperature().is_none()) {
            return Err(PlatformError::NotSupported);
        }

        log::debug!("Temperature sensor started ({} components)", components.list().len());
        self.components = Some(components);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlatformError> {
        self.components = None;
        Ok(())
    }

    fn read_celsius(&mut self) -> Result<f32, PlatformError> {
        let components = self.components.as_mut().ok_or(PlatformError::InvalidState)?;
        components.refresh(true);

        let readings: Vec<(String, f32)> = components
            .iter()
            .filter_map(|c| c.temperature().map(|t| (c.label().to_lowercase(), t)))
            .collect();

        let celsius = pick_die_temperature(&readings).ok_or(PlatformError::Timeout)?;

        if celsius < self.range.min_celsius as f32 || celsius > self.range.max_celsius as f32 {
            log::debug!(
                "Temperature {:.1}°C outside configured range {}..{}",
                celsius,
                self.range.min_celsius,
                self.range.max_celsius
            );
        }

        Ok(celsius)
    }
}

/// Prefer a die sensor; fall back to the first valid reading
fn pick_die_temperature(readings: &[(String, f32)]) -> Option<f32> {
    let valid = |t: &f32| t.is_finite();

    DIE_LABELS
        .iter()
        .find_map(|wanted| {
            readings
                .iter()
                .find(|(label, t)| label.contains(wanted) && valid(t))
                .map(|(_, t)| *t)
        })
        .or_else(|| readings.iter().map(|(_, t)| *t).find(valid))
}
