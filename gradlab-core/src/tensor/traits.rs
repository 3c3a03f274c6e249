use std::fmt;
use std::sync::Arc;

use crate::buffer::Buffer;
use crate::tensor::Tensor;

/// Maximum number of elements printed by `Debug` before eliding.
const DEBUG_PREVIEW_LEN: usize = 8;

impl fmt::Debug for Tensor {
    /// Shows dtype, shape, autograd flags and a preview of the data.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = match self.data.read() {
            Ok(guard) => guard,
            Err(_) => return write!(f, "Tensor(Error: RwLock poisoned)"),
        };
        let values = guard.buffer.to_f64_vec();
        write!(
            f,
            "Tensor(dtype={:?}, shape={:?}, requires_grad={}, has_grad={}, has_grad_fn={}, data=",
            guard.dtype,
            guard.shape,
            guard.requires_grad,
            guard.grad.is_some(),
            guard.grad_fn.is_some()
        )?;
        if values.len() > DEBUG_PREVIEW_LEN {
            write!(f, "{:?} ... ({} elements))", &values[..DEBUG_PREVIEW_LEN], values.len())
        } else {
            write!(f, "{:?})", values)
        }
    }
}

impl PartialEq for Tensor {
    /// Two tensors are equal if they are the same node, or if they have the
    /// same dtype, shape and element values. Autograd metadata is ignored.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        let self_guard = self.read_data();
        let other_guard = other.read_data();
        if self_guard.shape != other_guard.shape {
            return false;
        }
        match (&self_guard.buffer, &other_guard.buffer) {
            (Buffer::F32(a), Buffer::F32(b)) => a == b,
            (Buffer::F64(a), Buffer::F64(b)) => a == b,
            (Buffer::I64(a), Buffer::I64(b)) => a == b,
            _ => false,
        }
    }
}
