//! Which chart currently owns each canvas, and which request may replace it.
//!
//! Two invariants live here:
//! - a canvas holds at most one live chart, and the old one is destroyed
//!   before the new one is created;
//! - only the most recently issued request for a canvas may draw into it, so
//!   a slow response for an older selection can never overwrite a newer one.

use std::collections::HashMap;

/// A live chart that must be released before its canvas is reused.
pub trait ChartHandle {
    fn destroy(&mut self);
}

/// Ticket for one render attempt on one canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    canvas: String,
    seq: u64,
}

impl RequestToken {
    pub fn canvas(&self) -> &str {
        &self.canvas
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

pub struct ChartRegistry<H: ChartHandle> {
    bindings: HashMap<String, H>,
    issued: HashMap<String, u64>,
}

impl<H: ChartHandle> ChartRegistry<H> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            issued: HashMap::new(),
        }
    }

    /// Issue the next token for `canvas`, superseding every earlier one.
    pub fn begin(&mut self, canvas: &str) -> RequestToken {
        let seq = self.issued.entry(canvas.to_string()).or_insert(0);
        *seq += 1;
        RequestToken {
            canvas: canvas.to_string(),
            seq: *seq,
        }
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.issued.get(&token.canvas).copied() == Some(token.seq)
    }

    /// Destroy whatever `canvas` holds, then create and bind a new chart.
    ///
    /// If `create` fails the canvas is left unbound.
    pub fn replace<E>(
        &mut self,
        canvas: &str,
        create: impl FnOnce() -> Result<H, E>,
    ) -> Result<(), E> {
        self.release(canvas);
        let handle = create()?;
        self.bindings.insert(canvas.to_string(), handle);
        Ok(())
    }

    /// Destroy and forget the chart bound to `canvas`. Returns whether one existed.
    pub fn release(&mut self, canvas: &str) -> bool {
        match self.bindings.remove(canvas) {
            Some(mut handle) => {
                handle.destroy();
                true
            }
            None => false,
        }
    }

    pub fn is_bound(&self, canvas: &str) -> bool {
        self.bindings.contains_key(canvas)
    }

    pub fn get(&self, canvas: &str) -> Option<&H> {
        self.bindings.get(canvas)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<H: ChartHandle> Default for ChartRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ChartHandle> Drop for ChartRegistry<H> {
    fn drop(&mut self) {
        for (_, mut handle) in self.bindings.drain() {
            handle.destroy();
        }
    }
}
