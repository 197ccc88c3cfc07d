//! Console information replies

use crate::command::ConsoleFeature;
use std::fmt;

/// Temperature reading
///
/// The console reports temperatures as hexadecimal text. When that text does
/// not parse the raw value is kept for display instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Temperature {
    Celsius(i64),
    Raw(String),
}

impl Temperature {
    /// Interpret an extracted value as a hexadecimal temperature
    pub fn from_value(value: &str) -> Self {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        match i64::from_str_radix(digits, 16) {
            Ok(celsius) => Temperature::Celsius(celsius),
            Err(_) => Temperature::Raw(value.to_string()),
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Celsius(c) => write!(f, "{} C", c),
            Temperature::Raw(raw) => write!(f, "{} C", raw),
        }
    }
}

/// Snapshot of the console-feature queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleInfo {
    pub kernel_version: String,
    pub console_type: String,
    pub cpu_key: String,
    pub title_id: String,
    pub cpu_temperature: Temperature,
    pub gpu_temperature: Temperature,
}

impl ConsoleInfo {
    /// Assemble from extracted values, one per [`ConsoleFeature::ALL`] entry
    pub fn from_values(values: [String; 6]) -> Self {
        let [kernel_version, console_type, cpu_key, title_id, cpu, gpu] = values;
        Self {
            kernel_version,
            console_type,
            cpu_key,
            title_id,
            cpu_temperature: Temperature::from_value(&cpu),
            gpu_temperature: Temperature::from_value(&gpu),
        }
    }

    /// Display value of one feature
    pub fn get(&self, feature: ConsoleFeature) -> String {
        match feature {
            ConsoleFeature::KernelVersion => self.kernel_version.clone(),
            ConsoleFeature::ConsoleType => self.console_type.clone(),
            ConsoleFeature::CpuKey => self.cpu_key.clone(),
            ConsoleFeature::TitleId => self.title_id.clone(),
            ConsoleFeature::CpuTemperature => self.cpu_temperature.to_string(),
            ConsoleFeature::GpuTemperature => self.gpu_temperature.to_string(),
        }
    }
}

impl fmt::Display for ConsoleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for feature in ConsoleFeature::ALL {
            writeln!(f, "{:<17} {}", format!("{}:", feature.label()), self.get(feature))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_fallback() {
        assert_eq!(Temperature::from_value("3A"), Temperature::Celsius(58));
        assert_eq!(Temperature::from_value("0x2f"), Temperature::Celsius(47));
        assert_eq!(
            Temperature::from_value("unknown"),
            Temperature::Raw("unknown".to_string())
        );
        assert_eq!(Temperature::Celsius(58).to_string(), "58 C");
        assert_eq!(Temperature::Raw("n/a".into()).to_string(), "n/a C");
    }

    #[test]
    fn test_console_info_display() {
        let info = ConsoleInfo::from_values([
            "2.0.17559.0".into(),
            "Jasper".into(),
            "0123456789ABCDEF".into(),
            "FFFE07D1".into(),
            "3A".into(),
            "zz".into(),
        ]);
        let text = info.to_string();
        assert!(text.contains("Kernel Version:   2.0.17559.0"));
        assert!(text.contains("CPU Temp:         58 C"));
        assert!(text.contains("GPU Temp:         zz C"));
        assert_eq!(text.lines().count(), 6);
    }
}
