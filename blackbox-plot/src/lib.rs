use blackbox_components::approximation::Approximation;
use blackbox_core::{Component, Series};
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoint};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("failed to open the plot window: {0}")]
    Window(String),
}

/// A runnable egui application showing one curve under a title.
pub struct PlotApp {
    title: String,
    points: Vec<PlotPoint>,
}

impl PlotApp {
    #[must_use]
    pub fn new(title: &str, curve: &Series) -> Self {
        Self {
            title: title.to_string(),
            points: curve.points().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    /// Opens a native window and blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be created.
    pub fn run(self) -> Result<(), PresentError> {
        let title = self.title.clone();
        eframe::run_native(
            &title,
            eframe::NativeOptions::default(),
            Box::new(|_cc| Ok(Box::new(self))),
        )
        .map_err(|err| PresentError::Window(err.to_string()))
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new(&self.title).strong());
            });

            Plot::new("approximation").show(ui, |plot_ui| {
                let points = self.points.as_slice();
                plot_ui.line(Line::new(points).color(egui::Color32::RED));
            });
        });
    }
}

/// Shows an [`Approximation`] as a line plot titled with its formula.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter;

/// Hands the dense curve and formula to the plot window.
///
/// # Errors
///
/// Returns an error if the window cannot be created.
pub fn present(curve: &Series, formula: &str) -> Result<(), PresentError> {
    log::debug!("showing {} points titled {formula:?}", curve.len());
    PlotApp::new(formula, curve).run()
}

impl Component for Presenter {
    type Input = Approximation;
    type Output = ();
    type Error = PresentError;

    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        present(&input.curve, &input.formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_app_keeps_curve_and_title() {
        let curve = Series::from_points([(-1.0, 1.0), (0.0, 0.0), (1.0, 1.0)]).unwrap();
        let app = PlotApp::new("y = 1x^2", &curve);

        assert_eq!(app.title(), "y = 1x^2");
        let xy: Vec<[f64; 2]> = app.points().iter().map(|p| [p.x, p.y]).collect();
        assert_eq!(xy, [[-1.0, 1.0], [0.0, 0.0], [1.0, 1.0]]);
    }
}
