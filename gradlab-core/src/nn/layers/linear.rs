use crate::error::GradLabError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::{randn_seeded, zeros, Tensor};

/// Applies an affine transformation `y = x·Wᵀ + b`.
///
/// `weight` has shape `[out_features, in_features]`, `bias` `[out_features]`.
/// Accepts `[in_features]` or `[batch, in_features]` inputs.
#[derive(Debug)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates an F32 layer with weights drawn from `N(0, 1/in_features)`
    /// using `seed`, and a zero bias.
    pub fn new(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        seed: u64,
    ) -> Result<Self, GradLabError> {
        let scale = 1.0 / (in_features.max(1) as f64).sqrt();
        let weight_tensor = randn_seeded(&[out_features, in_features], seed)?.mul_scalar(scale)?;
        let weight = Parameter::new(weight_tensor, Some("weight".to_string()))?;
        let bias = if has_bias {
            Some(Parameter::new(zeros(&[out_features])?, Some("bias".to_string()))?)
        } else {
            None
        };
        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
        })
    }

    /// Builds a layer from explicit tensors (any floating point dtype).
    pub fn from_tensors(weight: Tensor, bias: Option<Tensor>) -> Result<Self, GradLabError> {
        let shape = weight.shape();
        if shape.len() != 2 {
            return Err(GradLabError::UnsupportedOperation(format!(
                "Linear weight must be 2-D, got shape {:?}",
                shape
            )));
        }
        let (out_features, in_features) = (shape[0], shape[1]);
        let bias = match bias {
            Some(b) => {
                if b.shape() != [out_features] {
                    return Err(GradLabError::ShapeMismatch {
                        expected: vec![out_features],
                        actual: b.shape(),
                        operation: "Linear bias".to_string(),
                    });
                }
                Some(Parameter::new(b, Some("bias".to_string()))?)
            }
            None => None,
        };
        Ok(Linear {
            weight: Parameter::new(weight, Some("weight".to_string()))?,
            bias,
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn forward(&self, input: &Tensor) -> Result<Tensor, GradLabError> {
        let shape = input.shape();
        let batched = match shape.as_slice() {
            [n] if *n == self.in_features => false,
            [_, n] if *n == self.in_features => true,
            _ => {
                return Err(GradLabError::ShapeMismatch {
                    expected: vec![self.in_features],
                    actual: shape,
                    operation: "Linear::forward".to_string(),
                })
            }
        };
        let input_2d = if batched {
            input.clone()
        } else {
            input.reshape(vec![1, self.in_features])?
        };
        let mut output = input_2d.matmul(&self.weight.transpose()?)?;
        if let Some(bias) = &self.bias {
            output = output.add(bias)?;
        }
        if batched {
            Ok(output)
        } else {
            output.reshape(vec![self.out_features])
        }
    }

    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = vec![&self.weight];
        if let Some(bias) = &self.bias {
            params.push(bias);
        }
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.parameters()
            .into_iter()
            .map(|p| (p.name().unwrap_or("param").to_string(), p))
            .collect()
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
