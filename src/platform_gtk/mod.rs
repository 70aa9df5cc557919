//! GTK4 embedding of the narrative chart.
//!
//! The widget is a `ScrolledWindow` around a `DrawingArea` sized to the
//! chart surface. Pointer controllers feed the engine, the draw callback
//! renders through the Cairo path, and playback ticks run on a
//! `glib::timeout_add_local` source that scrolls the cursor column into view.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::{NarrativeChartEngine, ScrollRequest};
use crate::core::SceneGraphSource;
use crate::error::ChartResult;
use crate::playback::TickSchedule;
use crate::render::{CairoContextRenderer, Renderer};

pub type SharedEngine<R> = Rc<RefCell<NarrativeChartEngine<R>>>;

type TimerSlot = Rc<RefCell<Option<glib::SourceId>>>;

pub struct NarrativeChartWidget<R>
where
    R: Renderer + CairoContextRenderer + 'static,
{
    engine: SharedEngine<R>,
    scrolled: gtk::ScrolledWindow,
    drawing_area: gtk::DrawingArea,
    timer: TimerSlot,
}

impl<R> NarrativeChartWidget<R>
where
    R: Renderer + CairoContextRenderer + 'static,
{
    #[must_use]
    pub fn new(engine: NarrativeChartEngine<R>) -> Self {
        let engine = Rc::new(RefCell::new(engine));
        let drawing_area = gtk::DrawingArea::new();
        let scrolled = gtk::ScrolledWindow::new();
        scrolled.set_hexpand(true);
        scrolled.set_vexpand(true);
        scrolled.set_child(Some(&drawing_area));

        let widget = Self {
            engine,
            scrolled,
            drawing_area,
            timer: Rc::new(RefCell::new(None)),
        };
        widget.sync_surface_size();
        widget.attach_draw_func();
        widget.attach_pointer_controllers();
        widget
    }

    /// Top-level widget to pack into a host container.
    #[must_use]
    pub fn widget(&self) -> &gtk::ScrolledWindow {
        &self.scrolled
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn engine(&self) -> SharedEngine<R> {
        Rc::clone(&self.engine)
    }

    pub fn load_scenes<S>(&self, source: &S) -> ChartResult<()>
    where
        S: SceneGraphSource + ?Sized,
    {
        let schedule = self.engine.borrow_mut().load_scenes(source)?;
        self.apply_schedule(schedule);
        self.sync_surface_size();
        self.drawing_area.queue_draw();
        Ok(())
    }

    pub fn play(&self) {
        let schedule = self.engine.borrow_mut().play();
        self.apply_schedule(schedule);
    }

    pub fn pause(&self) {
        let schedule = self.engine.borrow_mut().pause();
        self.apply_schedule(schedule);
    }

    pub fn stop(&self) {
        let schedule = self.engine.borrow_mut().stop();
        self.apply_schedule(schedule);
        self.scrolled.hadjustment().set_value(0.0);
    }

    pub fn set_rate(&self, rate_multiplier: f64) -> ChartResult<()> {
        self.engine.borrow_mut().set_rate(rate_multiplier)
    }

    pub fn set_grid_lines_visible(&self, visible: bool) {
        self.engine.borrow_mut().set_grid_lines_visible(visible);
        self.drawing_area.queue_draw();
    }

    pub fn set_arcs_visible(&self, visible: bool) {
        self.engine.borrow_mut().set_arcs_visible(visible);
        self.drawing_area.queue_draw();
    }

    fn sync_surface_size(&self) {
        let viewport = self.engine.borrow().surface_viewport();
        self.drawing_area
            .set_content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX));
        self.drawing_area
            .set_content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX));
    }

    fn apply_schedule(&self, schedule: TickSchedule) {
        apply_tick_schedule(
            schedule,
            &self.engine,
            &self.timer,
            &self.scrolled.hadjustment(),
        );
    }

    fn attach_draw_func(&self) {
        let engine = Rc::clone(&self.engine);
        self.drawing_area
            .set_draw_func(move |_widget, context, width, height| {
                if width <= 0 || height <= 0 {
                    return;
                }
                let Ok(mut chart) = engine.try_borrow_mut() else {
                    return;
                };
                if let Err(err) = chart.render_on_cairo_context(context) {
                    warn!(error = %err, "narrative chart draw failed");
                }
            });
    }

    fn attach_pointer_controllers(&self) {
        let motion = gtk::EventControllerMotion::new();
        {
            let engine = Rc::clone(&self.engine);
            let drawing_area = self.drawing_area.clone();
            motion.connect_motion(move |_, x, y| {
                if let Ok(mut chart) = engine.try_borrow_mut() {
                    chart.pointer_move(x, y);
                    if chart.has_pending_invalidation() {
                        drawing_area.queue_draw();
                    }
                }
            });
        }
        {
            let engine = Rc::clone(&self.engine);
            let drawing_area = self.drawing_area.clone();
            motion.connect_leave(move |_| {
                if let Ok(mut chart) = engine.try_borrow_mut() {
                    chart.pointer_leave();
                    if chart.has_pending_invalidation() {
                        drawing_area.queue_draw();
                    }
                }
            });
        }
        self.drawing_area.add_controller(motion);

        let click = gtk::GestureClick::new();
        {
            let engine = Rc::clone(&self.engine);
            let drawing_area = self.drawing_area.clone();
            click.connect_pressed(move |_, n_press, x, y| {
                if n_press != 2 {
                    return;
                }
                if let Ok(mut chart) = engine.try_borrow_mut() {
                    chart.double_click(x, y);
                    if chart.has_pending_invalidation() {
                        drawing_area.queue_draw();
                    }
                }
            });
        }
        self.drawing_area.add_controller(click);
    }
}

impl<R> Drop for NarrativeChartWidget<R>
where
    R: Renderer + CairoContextRenderer + 'static,
{
    fn drop(&mut self) {
        if let Some(source) = self.timer.borrow_mut().take() {
            source.remove();
        }
    }
}

fn apply_tick_schedule<R>(
    schedule: TickSchedule,
    engine: &SharedEngine<R>,
    timer: &TimerSlot,
    adjustment: &gtk::Adjustment,
) where
    R: Renderer + CairoContextRenderer + 'static,
{
    match schedule {
        TickSchedule::Unchanged => {}
        TickSchedule::Cancel => {
            if let Some(source) = timer.borrow_mut().take() {
                source.remove();
            }
        }
        TickSchedule::Start { interval } => {
            if let Some(source) = timer.borrow_mut().take() {
                source.remove();
            }
            let engine = Rc::clone(engine);
            let slot = Rc::clone(timer);
            let adjustment = adjustment.clone();
            let source = glib::timeout_add_local(interval, move || {
                let Ok(mut chart) = engine.try_borrow_mut() else {
                    return glib::ControlFlow::Continue;
                };
                match chart.tick() {
                    Some(request) => {
                        scroll_into_view(&adjustment, request);
                        glib::ControlFlow::Continue
                    }
                    None => {
                        // Returning `Break` removes the source.
                        slot.borrow_mut().take();
                        glib::ControlFlow::Break
                    }
                }
            });
            *timer.borrow_mut() = Some(source);
        }
    }
}

fn scroll_into_view(adjustment: &gtk::Adjustment, request: ScrollRequest) {
    let value = adjustment.value();
    let page = adjustment.page_size();
    if request.wrapped || request.column_left < value {
        adjustment.set_value(request.column_left.min(adjustment.upper() - page).max(0.0));
    } else if request.column_right > value + page {
        adjustment.set_value(request.column_right - page);
    }
}
