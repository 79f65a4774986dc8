//! Recording fakes for renderer and uploader tests.

use crate::chart_config::ChartConfig;
use crate::notify::{Notifier, Toast};
use crate::registry::ChartHandle;
use crate::surface::{ChartSurface, DrawError};
use std::cell::RefCell;
use std::rc::Rc;

/// Everything that happened on the fake canvases, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Draw { canvas: String, id: usize },
    Destroy { canvas: String, id: usize },
}

#[derive(Default, Clone)]
pub struct RecordingSurface {
    events: Rc<RefCell<Vec<Event>>>,
    configs: Rc<RefCell<Vec<(String, ChartConfig)>>>,
}

pub struct TestHandle {
    canvas: String,
    id: usize,
    events: Rc<RefCell<Vec<Event>>>,
}

impl ChartHandle for TestHandle {
    fn destroy(&mut self) {
        self.events.borrow_mut().push(Event::Destroy {
            canvas: self.canvas.clone(),
            id: self.id,
        });
    }
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn destroys(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Destroy { .. }))
            .count()
    }

    pub fn configs(&self) -> Vec<(String, ChartConfig)> {
        self.configs.borrow().clone()
    }

    pub fn last_config(&self, canvas: &str) -> Option<ChartConfig> {
        self.configs
            .borrow()
            .iter()
            .rev()
            .find(|(c, _)| c == canvas)
            .map(|(_, config)| config.clone())
    }
}

impl ChartSurface for RecordingSurface {
    type Handle = TestHandle;

    fn draw(&self, canvas_id: &str, config: &ChartConfig) -> Result<TestHandle, DrawError> {
        if canvas_id == "missing" {
            return Err(DrawError {
                canvas: canvas_id.to_string(),
                reason: "no such element".to_string(),
            });
        }
        let id = self.configs.borrow().len() + 1;
        self.configs
            .borrow_mut()
            .push((canvas_id.to_string(), config.clone()));
        self.events.borrow_mut().push(Event::Draw {
            canvas: canvas_id.to_string(),
            id,
        });
        Ok(TestHandle {
            canvas: canvas_id.to_string(),
            id,
            events: Rc::clone(&self.events),
        })
    }
}

#[derive(Default, Clone)]
pub struct RecordingNotifier {
    toasts: Rc<RefCell<Vec<Toast>>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}
