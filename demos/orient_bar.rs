use barframe::{point, Structure};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A single sloped rafter between two nodes
    let mut structure = Structure::new();
    let eave = structure.add_node(point(0.0, 0.0, 3.0));
    let ridge = structure.add_node(point(4.0, 0.0, 6.0));

    // Without a K-point the rafter is oriented by global Y
    let rafter = structure.add_bar(eave, ridge, None)?;
    if let Some(frame) = structure.bar_frame(rafter) {
        println!("default orientation: y' = {:?}", frame.y_prime());
    }

    // Point the local y axis towards a K-point above the ridge instead
    structure.set_k_point(rafter, Some(point(0.0, 0.0, 10.0)))?;
    if let Some(frame) = structure.bar_frame(rafter) {
        println!("with K-point:        y' = {:?}", frame.y_prime());
        println!("origin:              {:?}", frame.origin());
    }

    // All done
    Ok(())
}
