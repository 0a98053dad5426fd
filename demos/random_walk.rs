use plotview::{Plot, PlotLayout};
use rand_distr::{Distribution, StandardNormal};

fn main() -> anyhow::Result<()> {
    plotview::logging::init();

    const NUM_STEPS: usize = 550;
    const STEP_SIZE: f64 = 0.02;

    let mut rng = rand::rng();

    let xs: Vec<f64> = (0..NUM_STEPS).map(|i| i as f64 / 200. - 1.1).collect();
    let mut walk = || {
        let mut current = 0.0;
        (0..NUM_STEPS)
            .map(|_| {
                let value = current;
                let step: f64 = StandardNormal.sample(&mut rng);
                current += step * STEP_SIZE;
                value
            })
            .collect::<Vec<f64>>()
    };
    let ys = walk();
    let ys2 = walk();

    let mut plot = Plot::new(
        PlotLayout::new()
            .with_width(800.0)
            .with_height(600.0)
            .with_border(40)
            .with_title("random walk"),
    );
    plot.add_xy(&xs, &ys)?;
    plot.add_xy(&xs, &ys2)?;

    plot.show()?;
    Ok(())
}
