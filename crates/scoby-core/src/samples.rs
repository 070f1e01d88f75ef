//! Per-batch sample arrays and the declared sample count.
//!
//! Two states are kept from diverging: an array that holds no measurement
//! at all is always represented as an absent field, never as a run of
//! nulls. Every present array is exactly `number_of_samples` long.

use crate::entities::{Batch, Experiment, MAX_NUMBER_OF_SAMPLES, Samples};
use crate::enums::CountKind;
use crate::errors::CoreError;

/// Collapse an all-null (or empty) array to absent.
#[must_use]
pub fn collapse(samples: Samples) -> Option<Samples> {
    if samples.iter().all(Option::is_none) {
        None
    } else {
        Some(samples)
    }
}

/// Pad with trailing nulls or truncate from the end so the array is
/// `new_size` long, keeping entered values at their index. An array left
/// without any value collapses to absent; an absent array stays absent.
#[must_use]
pub fn resize_samples(samples: Option<Samples>, new_size: usize) -> Option<Samples> {
    let mut samples = samples?;
    samples.resize(new_size, None);
    collapse(samples)
}

/// Write one sample of `batch`, materializing a null-filled array of
/// `number_of_samples` entries first when the field is absent.
///
/// Non-finite values are stored as null.
///
/// # Errors
///
/// Returns `CoreError::Validation` when `index` is not below
/// `number_of_samples`.
pub fn set_sample(
    batch: &mut Batch,
    kind: CountKind,
    index: usize,
    value: Option<f64>,
    number_of_samples: usize,
) -> Result<(), CoreError> {
    if index >= number_of_samples {
        return Err(CoreError::Validation(format!(
            "sample index {index} out of range for {number_of_samples} samples"
        )));
    }

    let field = batch.samples_mut(kind);
    let mut samples = field
        .take()
        .unwrap_or_else(|| vec![None; number_of_samples]);
    samples.resize(number_of_samples, None);
    samples[index] = value.filter(|v| v.is_finite());
    *field = collapse(samples);
    Ok(())
}

/// Interpret text typed into a measurement field. Anything that is not a
/// finite number (including empty text) is no measurement.
#[must_use]
pub fn parse_sample_input(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

impl Experiment {
    /// [`set_sample`] on the batch with `batch_id`.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown batch, `CoreError::Validation`
    /// for an out-of-range index.
    pub fn set_sample(
        &mut self,
        batch_id: &str,
        kind: CountKind,
        index: usize,
        value: Option<f64>,
    ) -> Result<(), CoreError> {
        let number_of_samples = self.number_of_samples;
        let batch = self
            .batch_mut(batch_id)
            .ok_or_else(|| CoreError::batch_not_found(batch_id))?;
        set_sample(batch, kind, index, value, number_of_samples)
    }

    /// Change the declared sample count and resize every batch array to it.
    ///
    /// Shrinking discards the measurements past the new end; there is no way
    /// to get them back.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a size of zero or one above
    /// [`MAX_NUMBER_OF_SAMPLES`].
    pub fn resize(&mut self, new_size: usize) -> Result<(), CoreError> {
        if new_size == 0 {
            return Err(CoreError::Validation(
                "number of samples must be at least 1".to_string(),
            ));
        }
        if new_size > MAX_NUMBER_OF_SAMPLES {
            return Err(CoreError::Validation(format!(
                "number of samples must be at most {MAX_NUMBER_OF_SAMPLES}"
            )));
        }

        if new_size < self.number_of_samples {
            tracing::debug!(
                experiment = %self.id,
                from = self.number_of_samples,
                to = new_size,
                "truncating sample arrays"
            );
        }

        for batch in &mut self.batches {
            for kind in CountKind::ALL {
                let field = batch.samples_mut(kind);
                *field = resize_samples(field.take(), new_size);
            }
        }
        self.number_of_samples = new_size;
        Ok(())
    }
}
