//! Scaler adapters evaluating previously fit parameters.

use crate::common::error::{SurvError, SurvResult};

use super::domain::Scaler;

/// Standardisation: `(x - mean) / scale`, either step optional.
#[derive(Clone, Debug)]
pub struct StandardScaler {
    mean: Option<Vec<f64>>,
    scale: Option<Vec<f64>>,
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    /// Zero entries in `scale` divide by one, as they do at fit time.
    pub fn new(
        mean: Option<Vec<f64>>,
        scale: Option<Vec<f64>>,
        feature_names: Option<Vec<String>>,
    ) -> Result<Self, String> {
        if let (Some(mean), Some(scale)) = (&mean, &scale) {
            if mean.len() != scale.len() {
                return Err(format!(
                    "mean has {} entries but scale has {}",
                    mean.len(),
                    scale.len()
                ));
            }
        }
        let scale = scale.map(|s| {
            s.into_iter()
                .map(|v| if v == 0.0 { 1.0 } else { v })
                .collect()
        });
        Ok(Self {
            mean,
            scale,
            feature_names,
        })
    }

    fn width(&self) -> Option<usize> {
        self.mean
            .as_ref()
            .or(self.scale.as_ref())
            .map(Vec::len)
    }
}

impl Scaler for StandardScaler {
    fn kind(&self) -> &'static str {
        "standard"
    }

    fn transform(&self, row: &[f64]) -> SurvResult<Vec<f64>> {
        check_width(self.width(), row.len())?;
        let out = row
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let centred = self.mean.as_ref().map_or(*x, |m| x - m[i]);
                self.scale.as_ref().map_or(centred, |s| centred / s[i])
            })
            .collect();
        Ok(out)
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

/// Range scaling: `x * scale + min`.
#[derive(Clone, Debug)]
pub struct MinMaxScaler {
    scale: Vec<f64>,
    min: Vec<f64>,
    feature_names: Option<Vec<String>>,
}

impl MinMaxScaler {
    pub fn new(
        scale: Vec<f64>,
        min: Vec<f64>,
        feature_names: Option<Vec<String>>,
    ) -> Result<Self, String> {
        if scale.len() != min.len() {
            return Err(format!(
                "scale has {} entries but min has {}",
                scale.len(),
                min.len()
            ));
        }
        Ok(Self {
            scale,
            min,
            feature_names,
        })
    }
}

impl Scaler for MinMaxScaler {
    fn kind(&self) -> &'static str {
        "min_max"
    }

    fn transform(&self, row: &[f64]) -> SurvResult<Vec<f64>> {
        check_width(Some(self.scale.len()), row.len())?;
        Ok(row
            .iter()
            .zip(self.scale.iter().zip(&self.min))
            .map(|(x, (s, m))| x * s + m)
            .collect())
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

fn check_width(expected: Option<usize>, found: usize) -> SurvResult<()> {
    match expected {
        Some(expected) if expected != found => Err(SurvError::internal(format!(
            "scaler expects {expected} features, got {found}"
        ))),
        _ => Ok(()),
    }
}
