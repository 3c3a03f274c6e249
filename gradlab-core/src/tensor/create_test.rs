use super::*;
use approx::assert_relative_eq;

#[test]
fn test_zeros_ones_full() -> Result<(), GradLabError> {
    let z = zeros(&[2, 3])?;
    assert_eq!(z.shape(), vec![2, 3]);
    assert_eq!(z.dtype(), DType::F32);
    assert!(z.get_f32_data()?.iter().all(|&x| x == 0.0));

    let o = ones_f64(&[4])?;
    assert_eq!(o.dtype(), DType::F64);
    assert_eq!(o.get_f64_data()?, vec![1.0; 4]);

    let f = full(&[2], 7.5)?;
    assert_eq!(f.get_f32_data()?, vec![7.5, 7.5]);
    Ok(())
}

#[test]
fn test_like_constructors_follow_dtype() -> Result<(), GradLabError> {
    let source = Tensor::new_i64(vec![1, 2, 3], vec![3])?;
    let z = zeros_like(&source)?;
    assert_eq!(z.dtype(), DType::I64);
    assert_eq!(z.get_i64_data()?, vec![0, 0, 0]);

    let source_f64 = Tensor::new_f64(vec![1.0, 2.0], vec![1, 2])?;
    let f = full_like(&source_f64, 2.5)?;
    assert_eq!(f.shape(), vec![1, 2]);
    assert_eq!(f.get_f64_data()?, vec![2.5, 2.5]);
    Ok(())
}

#[test]
fn test_arange() -> Result<(), GradLabError> {
    let t = arange(0.0, 5.0, 1.0)?;
    assert_eq!(t.get_f32_data()?, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    let t = arange(1.0, 2.0, 0.25)?;
    assert_eq!(t.numel(), 4);
    assert!(arange(0.0, 1.0, 0.0).is_err());
    assert!(arange(0.0, 1.0, -1.0).is_err());
    Ok(())
}

#[test]
fn test_linspace_includes_end_points() -> Result<(), GradLabError> {
    let t = linspace(-1.0, 1.0, 5)?;
    let data = t.get_f64_data()?;
    assert_eq!(data.len(), 5);
    assert_relative_eq!(data[0], -1.0);
    assert_relative_eq!(data[2], 0.0);
    assert_relative_eq!(data[4], 1.0);
    assert!(linspace(0.0, 1.0, 1).is_err());
    Ok(())
}

#[test]
fn test_rand_uniform_bounds() -> Result<(), GradLabError> {
    let t = rand_uniform(&[100], -2.0, 3.0)?;
    assert!(t.get_f32_data()?.iter().all(|&x| (-2.0..3.0).contains(&x)));
    assert!(rand_uniform(&[1], 1.0, 1.0).is_err());
    Ok(())
}

#[test]
fn test_randn_seeded_is_reproducible() -> Result<(), GradLabError> {
    let a = randn_seeded(&[3, 3], 42)?;
    let b = randn_seeded(&[3, 3], 42)?;
    let c = randn_seeded(&[3, 3], 7)?;
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(randn(&[2, 5])?.numel(), 10);
    Ok(())
}
