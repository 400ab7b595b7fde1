use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::blood_pressure::Observation;
use crate::services::formatters::format_hhmmss_12h;

/// Most recent reading of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct LatestReading {
    pub systolic: i32,
    pub diastolic: i32,
    pub average: i32,
}

/// Blood pressure series flattened into parallel columns for charting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PlotSeries {
    /// Raw HHMMSS times, one per point
    pub times: Vec<String>,

    /// Axis labels, empty except on ten-minute marks
    pub labels: Vec<String>,

    /// Indexes of the points that carry a label
    pub label_indexes: Vec<usize>,

    pub systolic: Vec<i32>,
    pub diastolic: Vec<i32>,
    pub average: Vec<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<LatestReading>,
}

impl PlotSeries {
    /// Flatten observations in their original order
    pub fn from_observations(observations: &[Observation]) -> Self {
        let mut series = PlotSeries {
            times: Vec::with_capacity(observations.len()),
            labels: Vec::with_capacity(observations.len()),
            systolic: Vec::with_capacity(observations.len()),
            diastolic: Vec::with_capacity(observations.len()),
            average: Vec::with_capacity(observations.len()),
            ..Default::default()
        };

        for (index, observation) in observations.iter().enumerate() {
            let label = axis_label(&observation.time);
            if !label.is_empty() {
                series.label_indexes.push(index);
            }

            series.times.push(observation.time.clone());
            series.labels.push(label);
            series.systolic.push(observation.systolic);
            series.diastolic.push(observation.diastolic);
            series.average.push(observation.average);
        }

        series.latest = observations.last().map(|o| LatestReading {
            systolic: o.systolic,
            diastolic: o.diastolic,
            average: o.average,
        });

        series
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

// Only ten-minute marks are labelled so the axis stays readable
fn axis_label(time: &str) -> String {
    let on_mark = time
        .get(2..4)
        .and_then(|m| m.parse::<u32>().ok())
        .map_or(false, |minutes| minutes % 10 == 0);

    if on_mark {
        format_hhmmss_12h(time).unwrap_or_default()
    } else {
        String::new()
    }
}
