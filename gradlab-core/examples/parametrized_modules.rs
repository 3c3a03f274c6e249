//! Lesson 4: modules hold parameters; autograd fills their gradients.

use gradlab_core::nn::{Linear, Module};
use gradlab_core::tensor::randn_seeded;
use gradlab_core::{no_grad, GradLabError};

fn main() -> Result<(), GradLabError> {
    env_logger::init();

    let layer = Linear::new(3, 2, true, 7)?;
    for (name, param) in layer.named_parameters() {
        println!("{:<6} {:?}", name, param.shape());
    }

    let x = randn_seeded(&[4, 3], 1)?;
    let y = layer.forward(&x)?;
    println!("output: {:?}", y);

    let loss = y.pow_scalar(2.0)?.mean()?;
    loss.backward(None)?;
    println!("loss = {:.5}", loss.item()?);
    for (name, param) in layer.named_parameters() {
        println!("d loss / d {} = {:?}", name, param.grad());
    }

    // One hand-written descent step, outside the graph.
    no_grad(|| -> Result<(), GradLabError> {
        for param in layer.parameters() {
            if let Some(grad) = param.grad() {
                param.sub_scaled_(&grad, 0.1)?;
            }
        }
        Ok(())
    })?;
    layer.zero_grad();
    println!("loss after one step = {:.5}", layer.forward(&x)?.pow_scalar(2.0)?.mean()?.item()?);

    layer.set_requires_grad(false)?;
    println!("frozen output requires grad: {}", layer.forward(&x)?.requires_grad());
    Ok(())
}
