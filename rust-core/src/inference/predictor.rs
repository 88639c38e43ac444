//! Linear classifiers evaluated from fitted coefficients.
//!
//! Binary models carry a single decision row whose positive side selects
//! `classes[1]`; multiclass models carry one row per class and pick the
//! largest score.

use crate::common::error::{SurvError, SurvResult};

use super::domain::{ClassDecision, Classifier};

/// How scores turn into probabilities, if at all.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LinkFunction {
    /// Logistic link (softmax for more than two classes).
    Logistic,
    /// Decision function only.
    DecisionOnly,
}

/// Fitted linear model: `scores = coef · x + intercept`.
#[derive(Clone, Debug)]
pub struct LinearClassifier {
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    link: LinkFunction,
    feature_names: Option<Vec<String>>,
}

impl LinearClassifier {
    pub fn new(
        classes: Vec<i64>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        link: LinkFunction,
        feature_names: Option<Vec<String>>,
    ) -> Result<Self, String> {
        if classes.len() < 2 {
            return Err(format!("need at least 2 classes, got {}", classes.len()));
        }
        let rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coef.len() != rows || intercept.len() != rows {
            return Err(format!(
                "{} classes need {rows} coefficient rows and intercepts, got {} and {}",
                classes.len(),
                coef.len(),
                intercept.len()
            ));
        }
        let width = coef[0].len();
        if coef.iter().any(|row| row.len() != width) {
            return Err("coefficient rows differ in length".to_string());
        }
        if let Some(names) = &feature_names {
            if names.len() != width {
                return Err(format!(
                    "{} feature names for {width} coefficients",
                    names.len()
                ));
            }
        }
        Ok(Self {
            classes,
            coef,
            intercept,
            link,
            feature_names,
        })
    }

    /// Number of input columns the model was fit on.
    pub fn width(&self) -> usize {
        self.coef[0].len()
    }

    fn scores(&self, row: &[f64]) -> SurvResult<Vec<f64>> {
        if row.len() != self.width() {
            return Err(SurvError::internal(format!(
                "model expects {} features, got {}",
                self.width(),
                row.len()
            )));
        }
        Ok(self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| {
                weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + bias
            })
            .collect())
    }
}

impl Classifier for LinearClassifier {
    fn kind(&self) -> &'static str {
        match self.link {
            LinkFunction::Logistic => "logistic_regression",
            LinkFunction::DecisionOnly => "linear_svc",
        }
    }

    fn predict(&self, row: &[f64]) -> SurvResult<ClassDecision> {
        let scores = self.scores(row)?;
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(SurvError::internal("decision function is not finite"));
        }

        let (index, confidence) = if let &[score] = scores.as_slice() {
            let index = usize::from(score > 0.0);
            let confidence = match self.link {
                LinkFunction::Logistic => {
                    let p = sigmoid(score);
                    Some(p.max(1.0 - p))
                }
                LinkFunction::DecisionOnly => None,
            };
            (index, confidence)
        } else {
            let index = argmax(&scores);
            let confidence = match self.link {
                LinkFunction::Logistic => softmax(&scores).into_iter().reduce(f64::max),
                LinkFunction::DecisionOnly => None,
            };
            (index, confidence)
        };

        Ok(ClassDecision {
            class: self.classes[index],
            confidence,
        })
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

// First index wins on ties.
fn argmax(scores: &[f64]) -> usize {
    scores
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &s)| {
            if s > best.1 {
                (i, s)
            } else {
                best
            }
        })
        .0
}
