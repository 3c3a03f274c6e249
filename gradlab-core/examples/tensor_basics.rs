//! Lesson 1 and 2: creating tensors, element types, and ndarray interop.
//!
//! Run with `RUST_LOG=debug cargo run --example tensor_basics`.

use gradlab_core::ndarray::array;
use gradlab_core::tensor::{arange, full_like, linspace, ones, randn_seeded, zeros_f64};
use gradlab_core::{DType, GradLabError, Tensor};

fn main() -> Result<(), GradLabError> {
    env_logger::init();

    println!("--- Creation ---");
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;
    println!("from a Vec       : {:?}", a);
    println!("shape {:?}, strides {:?}, dtype {:?}", a.shape(), a.strides(), a.dtype());
    println!("ones [2, 2]      : {:?}", ones(&[2, 2])?);
    println!("zeros_f64 [3]    : {:?}", zeros_f64(&[3])?);
    println!("full_like(a, 7)  : {:?}", full_like(&a, 7.0)?);
    println!("arange(0, 5, 1)  : {:?}", arange(0.0, 5.0, 1.0)?);
    println!("linspace(0, 1, 5): {:?}", linspace(0.0, 1.0, 5)?);
    println!("randn (seed 42)  : {:?}", randn_seeded(&[2, 2], 42)?);

    println!("\n--- Element types ---");
    let ints = Tensor::new_i64(vec![1, 2, 3], vec![3])?;
    let floats = Tensor::new_f64(vec![0.5, 0.5, 0.5], vec![3])?;
    println!("ints   : {:?}", ints);
    println!("floats : {:?}", floats);

    // Mixing element types is refused; the conversion must be explicit.
    match ints.add(&floats) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("i64 + f64 fails: {}", e),
    }
    let converted = ints.cast(DType::F64)?;
    println!("cast then add    : {:?}", converted.add(&floats)?);
    println!("i64 * 2          : {:?}", ints.mul_scalar(2.0)?);

    println!("\n--- ndarray interop ---");
    let arr = array![[1.0f64, 2.0], [3.0, 4.0]];
    let t = Tensor::from_ndarray(&arr)?;
    println!("from ndarray     : {:?}", t);
    let back = t.mul_scalar(10.0)?.to_ndarray::<f64>()?;
    println!("back to ndarray  :\n{}", back);
    println!("original array untouched:\n{}", arr);

    Ok(())
}
