use plotview::{
    PlotLayout, PlotStyle, Point, Projection, Renderer, SceneRenderer, Series, SeriesStore,
    ViewController,
};

/// Records what the collaborator was handed.
#[derive(Default)]
struct Recording {
    uploads: Vec<usize>,
    frames: Vec<(Vec<usize>, Projection)>,
}

impl Renderer for Recording {
    type Handle = usize;

    fn upload(&mut self, series: &Series) -> usize {
        self.uploads.push(series.len());
        series.len()
    }

    fn draw<'h, I>(&mut self, handles: I, projection: &Projection)
    where
        I: IntoIterator<Item = &'h usize>,
    {
        self.frames
            .push((handles.into_iter().copied().collect(), *projection));
    }
}

fn store() -> SeriesStore {
    let mut store = SeriesStore::new();
    for n in [3, 1, 5] {
        store.add(Series::new(
            (0..n).map(|i| Point::new(i as f64, (i * i) as f64)).collect(),
        ));
    }
    store
}

#[test]
fn handles_are_drawn_in_insertion_order() {
    let store = store();
    let mut view = ViewController::new(&PlotLayout::default(), 500, 500).unwrap();
    view.fit(&store);

    let mut renderer = Recording::default();
    let handles: Vec<usize> = store
        .iter()
        .map(|(_, series)| renderer.upload(series))
        .collect();
    renderer.draw(&handles, view.projection());

    view.zoom(2.0);
    renderer.draw(&handles, view.projection());

    assert_eq!(renderer.uploads, vec![3, 1, 5]);
    assert_eq!(renderer.frames.len(), 2);
    assert_eq!(renderer.frames[0].0, vec![3, 1, 5]);
    assert_ne!(renderer.frames[0].1, renderer.frames[1].1);
}

#[test]
fn scene_renderer_builds_a_scene() {
    let store = store();
    let mut view = ViewController::new(&PlotLayout::default(), 500, 500).unwrap();
    view.fit(&store);

    let mut renderer = SceneRenderer::new(PlotStyle::default());
    let handles: Vec<_> = store
        .iter()
        .map(|(_, series)| renderer.upload(series))
        .collect();
    assert_eq!(handles[1].path().elements().len(), 1);

    renderer.draw(&handles, view.projection());
    assert!(!renderer.scene().encoding().is_empty());

    renderer.draw(std::iter::empty(), view.projection());
    assert!(renderer.scene().encoding().is_empty());
}
