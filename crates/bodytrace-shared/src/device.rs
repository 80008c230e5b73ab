//! Readings reported by the devices

use bodytrace_time::Timestamp;

use crate::{
    imei::Imei,
    units::{non_zero, CENTI_MMHG_PER_MMHG},
};

#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq)]
pub struct ReadingValues {
    /// Grams
    #[serde(default)]
    pub weight: Option<f64>,
    /// Hundredths of a mmHg
    #[serde(default)]
    pub systolic: Option<f64>,
    /// Hundredths of a mmHg
    #[serde(default)]
    pub diastolic: Option<f64>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct DeviceReading {
    #[serde(default)]
    pub imei: Option<Imei>,
    #[serde(default, alias = "dateTime")]
    pub ts: Option<Timestamp>,
    #[serde(default)]
    pub values: Option<ReadingValues>,
}

impl DeviceReading {
    pub fn weight(&self) -> Option<f64> {
        self.values.and_then(|v| non_zero(v.weight))
    }

    pub fn systolic(&self) -> Option<f64> {
        self.values.and_then(|v| non_zero(v.systolic))
    }

    pub fn diastolic(&self) -> Option<f64> {
        self.values.and_then(|v| non_zero(v.diastolic))
    }

    pub fn has_values(&self) -> bool {
        self.values.is_some()
    }
}

/// The device data endpoints send either a bare list or one wrapped in `data`
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum ReadingsEnvelope {
    Bare(Vec<DeviceReading>),
    Wrapped { data: Vec<DeviceReading> },
}

impl From<ReadingsEnvelope> for Vec<DeviceReading> {
    fn from(value: ReadingsEnvelope) -> Self {
        match value {
            ReadingsEnvelope::Bare(readings) | ReadingsEnvelope::Wrapped { data: readings } => {
                readings
            }
        }
    }
}

/// Which optional columns a table of readings needs
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadingColumns {
    pub weight: bool,
    pub systolic: bool,
    pub diastolic: bool,
}

impl ReadingColumns {
    pub fn from_readings<'a>(readings: impl IntoIterator<Item = &'a DeviceReading>) -> Self {
        readings
            .into_iter()
            .fold(Self::default(), |acc, reading| Self {
                weight: acc.weight || reading.weight().is_some(),
                systolic: acc.systolic || reading.systolic().is_some(),
                diastolic: acc.diastolic || reading.diastolic().is_some(),
            })
    }

    pub fn count(&self) -> usize {
        [self.weight, self.systolic, self.diastolic]
            .into_iter()
            .filter(|x| *x)
            .count()
    }

    pub fn any(&self) -> bool {
        self.count() > 0
    }
}

/// Readings with values and a timestamp, newest first
pub fn chart_readings(readings: &[DeviceReading]) -> Vec<&DeviceReading> {
    let mut result: Vec<_> = readings
        .iter()
        .filter(|r| r.has_values() && r.ts.is_some())
        .collect();
    result.sort_by(|a, b| b.ts.cmp(&a.ts));
    result
}

/// A point on a chart series. `x` is days since the epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChartSeries {
    pub weight: Vec<ChartPoint>,
    pub systolic: Vec<ChartPoint>,
    pub diastolic: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Builds the plot series in display units
    pub fn build(readings: &[DeviceReading], unit: crate::units::WeightUnit) -> Self {
        let mut result = Self::default();
        for reading in chart_readings(readings) {
            let Some(ts) = reading.ts else {
                continue;
            };
            let x = ts.as_days_f64();
            if let Some(grams) = reading.weight() {
                result.weight.push(ChartPoint {
                    x,
                    y: unit.from_grams(grams),
                });
            }
            if let Some(value) = reading.systolic() {
                result.systolic.push(ChartPoint {
                    x,
                    y: value / CENTI_MMHG_PER_MMHG,
                });
            }
            if let Some(value) = reading.diastolic() {
                result.diastolic.push(ChartPoint {
                    x,
                    y: value / CENTI_MMHG_PER_MMHG,
                });
            }
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.weight.is_empty() && self.systolic.is_empty() && self.diastolic.is_empty()
    }
}
