use crate::error::GradLabError;
use crate::ops;
use crate::tensor::create::full_with_dtype;
use crate::tensor::Tensor;
use crate::types::DType;

impl Tensor {
    /// Builds a 0-d constant of this tensor's dtype, for the scalar forms.
    fn scalar_like(&self, value: f64) -> Result<Tensor, GradLabError> {
        full_with_dtype(&[], value, self.dtype())
    }

    /// Element-wise `self + other` with broadcasting.
    /// Delegates to `ops::arithmetic::add_op`.
    pub fn add(&self, other: &Tensor) -> Result<Tensor, GradLabError> {
        ops::arithmetic::add_op(self, other)
    }

    /// Element-wise `self - other` with broadcasting.
    pub fn sub(&self, other: &Tensor) -> Result<Tensor, GradLabError> {
        ops::arithmetic::sub_op(self, other)
    }

    /// Element-wise `self * other` with broadcasting.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor, GradLabError> {
        ops::arithmetic::mul_op(self, other)
    }

    /// Element-wise `self / other` with broadcasting. Floating point only.
    pub fn div(&self, other: &Tensor) -> Result<Tensor, GradLabError> {
        ops::arithmetic::div_op(self, other)
    }

    pub fn neg(&self) -> Result<Tensor, GradLabError> {
        ops::arithmetic::neg_op(self)
    }

    pub fn pow_scalar(&self, exponent: f64) -> Result<Tensor, GradLabError> {
        ops::arithmetic::pow_scalar_op(self, exponent)
    }

    /// `self + value`, where `value` is converted to this tensor's dtype.
    pub fn add_scalar(&self, value: f64) -> Result<Tensor, GradLabError> {
        ops::arithmetic::add_op(self, &self.scalar_like(value)?)
    }

    pub fn sub_scalar(&self, value: f64) -> Result<Tensor, GradLabError> {
        ops::arithmetic::sub_op(self, &self.scalar_like(value)?)
    }

    /// `self * value`, where `value` is converted to this tensor's dtype
    /// (truncated for `I64`).
    pub fn mul_scalar(&self, value: f64) -> Result<Tensor, GradLabError> {
        ops::arithmetic::mul_op(self, &self.scalar_like(value)?)
    }

    pub fn div_scalar(&self, value: f64) -> Result<Tensor, GradLabError> {
        ops::arithmetic::div_op(self, &self.scalar_like(value)?)
    }

    pub fn exp(&self) -> Result<Tensor, GradLabError> {
        ops::math_elem::exp_op(self)
    }

    pub fn ln(&self) -> Result<Tensor, GradLabError> {
        ops::math_elem::ln_op(self)
    }

    pub fn sqrt(&self) -> Result<Tensor, GradLabError> {
        ops::math_elem::sqrt_op(self)
    }

    /// Sum of all elements as a 0-d tensor.
    pub fn sum(&self) -> Result<Tensor, GradLabError> {
        ops::reduction::sum_op(self)
    }

    /// Mean of all elements as a 0-d tensor.
    pub fn mean(&self) -> Result<Tensor, GradLabError> {
        ops::reduction::mean_op(self)
    }

    /// Euclidean norm of all elements, `sqrt(sum(x^2))`, as a 0-d tensor.
    ///
    /// Differentiable everywhere except at the origin, where the gradient
    /// is `NaN`.
    pub fn norm(&self) -> Result<Tensor, GradLabError> {
        self.pow_scalar(2.0)?.sum()?.sqrt()
    }

    /// Matrix product of two 2-D tensors.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, GradLabError> {
        ops::linalg::matmul_op(self, other)
    }

    /// Transpose of a 2-D tensor.
    pub fn transpose(&self) -> Result<Tensor, GradLabError> {
        ops::linalg::transpose_op(self)
    }

    pub fn reshape(&self, new_shape: Vec<usize>) -> Result<Tensor, GradLabError> {
        ops::view::reshape_op(self, new_shape)
    }

    /// Explicit dtype conversion. See [`ops::dtype::cast_op`].
    pub fn cast(&self, dtype: DType) -> Result<Tensor, GradLabError> {
        ops::dtype::cast_op(self, dtype)
    }

    /// Alias of [`Tensor::cast`].
    pub fn to_dtype(&self, dtype: DType) -> Result<Tensor, GradLabError> {
        self.cast(dtype)
    }
}
