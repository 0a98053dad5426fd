use plotview::{Plot, PlotLayout};

fn main() -> anyhow::Result<()> {
    plotview::logging::init();

    const SAMPLES: usize = 100;

    let mut plot = Plot::new(PlotLayout::new().with_title("functions"));

    plot.add_fn(
        |x| if x.abs() < 1e-5 { 2.0 } else { (2.0 * x).sin() / x },
        -10.0,
        10.0,
        SAMPLES,
    );
    plot.add_fn(f64::sin, -5.0, 10.0, SAMPLES);
    plot.add_fn(
        |x| if x <= 0.0 { 0.0 } else { (-1.0 / x).exp() },
        -10.0,
        10.0,
        SAMPLES,
    );

    plot.show()?;
    Ok(())
}
