//! Lesson 3: derivatives of scalar functions.
//!
//! f(x) = x^3 - 2x is differentiated with autograd and compared with the
//! closed form f'(x) = 3x^2 - 2 and with central finite differences.

use gradlab_core::autograd::check_grad;
use gradlab_core::tensor::linspace;
use gradlab_core::{no_grad, GradLabError, Tensor};

fn f(x: &Tensor) -> Result<Tensor, GradLabError> {
    x.pow_scalar(3.0)?.sub(&x.mul_scalar(2.0)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("--- One point ---");
    let x = Tensor::scalar_f64(1.5).requires_grad_(true)?;
    let y = f(&x)?;
    y.backward(None)?;
    let grad = x.grad().ok_or("no gradient")?.item()?;
    println!("f(1.5) = {:.4}, autograd f'(1.5) = {:.4}, closed form = {:.4}", y.item()?, grad, 3.0 * 1.5 * 1.5 - 2.0);

    println!("\n--- Many points at once ---");
    // Summing makes the output scalar; each element's gradient is f'(x_i).
    let xs = linspace(-2.0, 2.0, 9)?.requires_grad_(true)?;
    f(&xs)?.sum()?.backward(None)?;
    let grads = xs.grad().ok_or("no gradient")?.get_f64_data()?;
    for (xi, gi) in xs.get_f64_data()?.iter().zip(grads.iter()) {
        println!("x = {:5.2}  f'(x) = {:7.3}  expected {:7.3}", xi, gi, 3.0 * xi * xi - 2.0);
    }

    println!("\n--- Numerical check ---");
    let point = Tensor::new_f64(vec![-0.7, 0.3, 1.9], vec![3])?.requires_grad_(true)?;
    check_grad(|inputs| f(&inputs[0])?.sum(), &[point], 1e-6, 1e-6)?;
    println!("autograd agrees with finite differences");

    println!("\n--- Gradients accumulate ---");
    let x = Tensor::scalar_f64(2.0).requires_grad_(true)?;
    let y = x.pow_scalar(2.0)?;
    y.backward(None)?;
    y.backward(None)?;
    println!("after two backward calls: {:?}", x.grad().ok_or("no gradient")?.item()?);
    x.clear_grad();

    let untracked = no_grad(|| x.mul_scalar(3.0))?;
    println!("computed under no_grad requires grad: {}", untracked.requires_grad());
    Ok(())
}
