use gradlab_core::{DType, GradLabError, Tensor};

#[test]
fn test_mixed_dtypes_are_rejected() -> Result<(), GradLabError> {
    let a = Tensor::new_i64(vec![1, 2, 3], vec![3])?;
    let b = Tensor::new(vec![1.0, 2.0, 3.0], vec![3])?;
    for result in [a.add(&b), a.sub(&b), a.mul(&b), b.div(&a)] {
        assert!(matches!(result, Err(GradLabError::DataTypeMismatch { .. })));
    }
    let err = a.add(&b).unwrap_err();
    assert!(err.to_string().contains("add_op"));
    Ok(())
}

#[test]
fn test_scalar_operands_adopt_tensor_dtype() -> Result<(), GradLabError> {
    let a = Tensor::new_i64(vec![1, 2], vec![2])?;
    let b = a.add_scalar(0.5)?;
    assert_eq!(b.dtype(), DType::I64);
    assert_eq!(b.get_i64_data()?, vec![1, 2]);

    let f = Tensor::new(vec![1.0], vec![1])?.mul_scalar(0.25)?;
    assert_eq!(f.dtype(), DType::F32);
    Ok(())
}

#[test]
fn test_explicit_cast_fixes_mismatch() -> Result<(), GradLabError> {
    let a = Tensor::new_i64(vec![1, 2], vec![2])?;
    let b = Tensor::new_f64(vec![0.5, 0.5], vec![2])?;
    let sum = a.to_dtype(DType::F64)?.add(&b)?;
    assert_eq!(sum.get_f64_data()?, vec![1.5, 2.5]);
    Ok(())
}

#[test]
fn test_float_only_ops_reject_integers() -> Result<(), GradLabError> {
    let a = Tensor::new_i64(vec![1, 4], vec![2])?;
    assert!(matches!(a.exp(), Err(GradLabError::UnsupportedOperation(_))));
    assert!(matches!(a.sqrt(), Err(GradLabError::UnsupportedOperation(_))));
    assert!(matches!(a.mean(), Err(GradLabError::UnsupportedOperation(_))));
    assert!(matches!(
        a.set_requires_grad(true),
        Err(GradLabError::NonFloatingPointGrad(DType::I64))
    ));
    Ok(())
}
