#[cfg(feature = "gtk4-adapter")]
fn main() {
    use std::rc::Rc;

    use gtk4 as gtk;
    use gtk4::prelude::*;

    use narrative_chart::api::{NarrativeChartConfig, NarrativeChartEngine};
    use narrative_chart::core::{InteractionSnapshot, SceneBatch, SceneRef};
    use narrative_chart::platform_gtk::NarrativeChartWidget;
    use narrative_chart::render::CairoRenderer;

    fn demo_batch() -> narrative_chart::ChartResult<SceneBatch> {
        let snapshots = (0..8)
            .map(|scene| {
                let closeness = f64::from(scene) / 7.0;
                InteractionSnapshot::from_weights([
                    ("Alice", "Bob", 1.0 - closeness),
                    ("Alice", "Carol", closeness),
                    ("Bob", "Carol", 0.5),
                ])
            })
            .collect::<narrative_chart::ChartResult<Vec<_>>>()?;

        Ok(SceneBatch::new()
            .with_trajectory(
                "Alice",
                &[(0, 0), (1, 1), (2, 1), (3, 2), (4, 2), (5, 3), (6, 3), (7, 3)],
            )
            .with_trajectory(
                "Bob",
                &[(0, 1), (1, 0), (2, 0), (3, 0), (4, 1), (5, 1), (6, 0), (7, 0)],
            )
            .with_trajectory(
                "Carol",
                &[(0, 3), (1, 3), (2, 2), (3, 3), (4, 3), (5, 2), (6, 2), (7, 2)],
            )
            .with_snapshots(snapshots)
            .with_scene_refs((0..8).map(|scene| SceneRef::new(scene % 2 == 0, scene)).collect()))
    }

    let app = gtk::Application::builder()
        .application_id("rs.narrative_chart.demos.basic")
        .build();

    app.connect_activate(|app| {
        let config = NarrativeChartConfig::default().with_display(true, true);
        let engine = match CairoRenderer::new(900, 420)
            .and_then(|renderer| NarrativeChartEngine::new(renderer, config))
        {
            Ok(v) => v,
            Err(err) => {
                eprintln!("failed to initialize engine: {err}");
                return;
            }
        };

        let chart = Rc::new(NarrativeChartWidget::new(engine));
        if let Err(err) = demo_batch().and_then(|batch| chart.load_scenes(&batch)) {
            eprintln!("failed to load demo scenes: {err}");
            return;
        }

        let play = gtk::Button::with_label("Play");
        let pause = gtk::Button::with_label("Pause");
        let stop = gtk::Button::with_label("Stop");
        {
            let chart = Rc::clone(&chart);
            play.connect_clicked(move |_| chart.play());
        }
        {
            let chart = Rc::clone(&chart);
            pause.connect_clicked(move |_| chart.pause());
        }
        {
            let chart = Rc::clone(&chart);
            stop.connect_clicked(move |_| chart.stop());
        }

        let controls = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        controls.append(&play);
        controls.append(&pause);
        controls.append(&stop);

        let layout = gtk::Box::new(gtk::Orientation::Vertical, 6);
        layout.append(&controls);
        layout.append(chart.widget());

        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title("narrative-chart | demo")
            .default_width(900)
            .default_height(420)
            .build();
        window.set_child(Some(&layout));
        window.present();
    });

    let _ = app.run();
}

#[cfg(not(feature = "gtk4-adapter"))]
fn main() {
    println!("run with: cargo run --features desktop --example gtk_narrative_chart");
}
