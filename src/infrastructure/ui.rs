use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::metrics::presenter::{MetricSurface, PanelView};

/// Writes panel views into the page by element id. A missing slot is a
/// logged no-op so one absent element never takes down the other panels.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomMetricSurface;

impl DomMetricSurface {
    pub fn new() -> Self {
        Self
    }

    fn slot(slot_id: &str) -> Option<web_sys::Element> {
        web_sys::window()?.document()?.get_element_by_id(slot_id)
    }
}

impl MetricSurface for DomMetricSurface {
    fn render(&self, slot_id: &str, view: &PanelView) {
        let Some(element) = Self::slot(slot_id) else {
            get_logger().warn(
                LogComponent::Presentation("Dom"),
                &format!("slot #{} not found, panel skipped", slot_id),
            );
            return;
        };

        element.set_text_content(Some(&view.text));
        if let Some(color) = view.background {
            let style = format!("background-color: {}; color: #000000;", color);
            if element.set_attribute("style", &style).is_err() {
                get_logger().warn(
                    LogComponent::Presentation("Dom"),
                    &format!("style write failed for #{}", slot_id),
                );
            }
        }
    }
}
