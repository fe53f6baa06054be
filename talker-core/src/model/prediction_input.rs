use crate::error::TalkerError;

/// Input parameters of one `talk` call.
///
/// # Responsibilities
/// - Track the length budget (`max_len`) and the optional seed (`random_state`)
/// - Keep `temperature` and `top_p` within their valid ranges
///
/// # Invariants
/// - `temperature` is finite and `> 0`
/// - `top_p` is in `(0, 1]`
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionInput {
	/// Maximum number of raw tokens (prompt included) before post-processing.
	pub max_len: usize,

	/// Seed for the sampler; `None` draws a fresh seed from the OS.
	pub random_state: Option<u64>,

	/// Sharpness of sampling (< 1 sharpens, > 1 flattens).
	temperature: f64,

	/// Nucleus threshold.
	top_p: f64,
}

impl Default for PredictionInput {
	fn default() -> Self {
		Self { max_len: 50, random_state: None, temperature: 0.9, top_p: 0.85 }
	}
}

impl PredictionInput {
	/// Creates a validated input.
	///
	/// # Errors
	/// Returns an error if `temperature` or `top_p` is out of range.
	pub fn new(max_len: usize, random_state: Option<u64>, temperature: f64, top_p: f64) -> Result<Self, TalkerError> {
		let mut input = Self { max_len, random_state, ..Self::default() };
		input.set_temperature(temperature)?;
		input.set_top_p(top_p)?;
		Ok(input)
	}

	/// Returns the current temperature.
	pub fn temperature(&self) -> f64 {
		self.temperature
	}

	/// Returns the current nucleus threshold.
	pub fn top_p(&self) -> f64 {
		self.top_p
	}

	/// Sets the temperature.
	///
	/// # Errors
	/// Returns an error if the value is not finite or not `> 0`.
	pub fn set_temperature(&mut self, temperature: f64) -> Result<(), TalkerError> {
		if !temperature.is_finite() || temperature <= 0.0 {
			return Err(TalkerError::InvalidTemperature(temperature));
		}
		self.temperature = temperature;
		Ok(())
	}

	/// Sets the nucleus threshold.
	///
	/// # Errors
	/// Returns an error if the value is outside `(0, 1]`.
	pub fn set_top_p(&mut self, top_p: f64) -> Result<(), TalkerError> {
		if !(top_p > 0.0 && top_p <= 1.0) {
			return Err(TalkerError::InvalidTopP(top_p));
		}
		self.top_p = top_p;
		Ok(())
	}
}
