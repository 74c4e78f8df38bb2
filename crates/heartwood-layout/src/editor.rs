use heartwood_types::{BoardLayout, BoardSize, RowOrder, WoodRegistry, STRIP_COUNT};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Everything a single undo step must restore: the layout plus the
/// configuration-level knobs that mutations can change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub size: BoardSize,
    pub strip3_enabled: bool,
    pub layout: BoardLayout,
}

/// Interactive editor for one board configuration.
///
/// Single-owner and synchronous: no mutation can overlap another. The
/// `history`/`future` stacks are private to this editor and never shared.
#[derive(Clone, Debug)]
pub struct BoardEditor {
    current: EditorSnapshot,
    history: Vec<EditorSnapshot>,
    future: Vec<EditorSnapshot>,
}

impl BoardEditor {
    /// Start from a blank board of the given size.
    pub fn new(size: BoardSize) -> Self {
        Self::from_snapshot(EditorSnapshot {
            size,
            strip3_enabled: false,
            layout: BoardLayout::blank(size),
        })
    }

    /// Resume editing from a previously captured state (e.g. a template).
    pub fn from_snapshot(snapshot: EditorSnapshot) -> Self {
        Self {
            current: snapshot,
            history: Vec::new(),
            future: Vec::new(),
        }
    }

    pub fn size(&self) -> BoardSize {
        self.current.size
    }

    pub fn strip3_enabled(&self) -> bool {
        self.current.strip3_enabled
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.current.layout
    }

    pub fn snapshot(&self) -> &EditorSnapshot {
        &self.current
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Apply `mutate` to a working copy; commit it (pushing the pre-state
    /// onto history and clearing future) only if it changed anything.
    fn commit(&mut self, mutate: impl FnOnce(&mut EditorSnapshot)) -> bool {
        let mut next = self.current.clone();
        mutate(&mut next);
        if next == self.current {
            return false;
        }
        self.history.push(std::mem::replace(&mut self.current, next));
        self.future.clear();
        true
    }

    /// Paint one cell of one strip. No-op if the strip is inactive or the
    /// coordinates fall outside the grid.
    pub fn paint_cell(&mut self, strip_row: usize, col: usize, token: impl Into<String>) -> bool {
        let token = token.into();
        if !self.strip_active(strip_row) {
            return false;
        }
        if col >= self.current.layout.columns() {
            return false;
        }
        self.commit(|snap| {
            snap.layout.strips[strip_row][col] = Some(token);
        })
    }

    /// Empty every cell of one strip. Not applicable to an inactive strip.
    pub fn clear_strip(&mut self, strip_row: usize) -> bool {
        if !self.strip_active(strip_row) {
            return false;
        }
        self.commit(|snap| {
            for cell in &mut snap.layout.strips[strip_row] {
                *cell = None;
            }
        })
    }

    /// Replace the row-order list wholesale (drag reordering). The incoming
    /// list is normalized: strip numbers clamped to the active range and the
    /// length fixed to the size's row count.
    pub fn set_order(&mut self, new_order: Vec<RowOrder>) -> bool {
        let rows = self.current.size.rows();
        let strip3 = self.current.strip3_enabled;
        self.commit(|snap| {
            let mut order: Vec<RowOrder> = new_order
                .into_iter()
                .take(rows)
                .map(|mut entry| {
                    entry.strip_no = RowOrder::clamp_strip(entry.strip_no, strip3);
                    entry
                })
                .collect();
            while order.len() < rows {
                let row = order.len();
                order.push(RowOrder::new(if row % 2 == 0 { 1 } else { 2 }, false));
            }
            snap.layout.order = order;
        })
    }

    /// Toggle horizontal mirroring for one physical row.
    pub fn reflect_row(&mut self, row_index: usize) -> bool {
        if row_index >= self.current.layout.order.len() {
            return false;
        }
        self.commit(|snap| {
            snap.layout.order[row_index].reflected = !snap.layout.order[row_index].reflected;
        })
    }

    /// Reassign which strip one physical row displays. `strip_no` is clamped
    /// into the active range.
    pub fn change_row_strip(&mut self, row_index: usize, strip_no: u8) -> bool {
        if row_index >= self.current.layout.order.len() {
            return false;
        }
        let clamped = RowOrder::clamp_strip(strip_no, self.current.strip3_enabled);
        self.commit(|snap| {
            snap.layout.order[row_index].strip_no = clamped;
        })
    }

    /// Enable or disable the third strip. Disabling clamps any row order
    /// entry that still references strip 3.
    pub fn set_strip3_enabled(&mut self, enabled: bool) -> bool {
        self.commit(|snap| {
            snap.strip3_enabled = enabled;
            if !enabled {
                for entry in &mut snap.layout.order {
                    entry.strip_no = RowOrder::clamp_strip(entry.strip_no, false);
                }
            }
        })
    }

    /// Fill every active cell with a uniformly random token from `registry`
    /// and randomize every row-order entry. One undo step.
    pub fn randomize<R: Rng + ?Sized>(&mut self, registry: &WoodRegistry, rng: &mut R) -> bool {
        if registry.is_empty() {
            return false;
        }
        let active = BoardLayout::active_strips(self.current.strip3_enabled);
        let max_strip = active.end as u8;
        let picks: Vec<String> = {
            let columns = self.current.layout.columns();
            (0..active.end * columns)
                .map(|_| registry.tokens()[rng.gen_range(0..registry.len())].clone())
                .collect()
        };
        let orders: Vec<RowOrder> = (0..self.current.layout.order.len())
            .map(|_| RowOrder::new(rng.gen_range(1..=max_strip), rng.gen_bool(0.5)))
            .collect();
        self.commit(|snap| {
            let columns = snap.layout.columns();
            let mut picks = picks.into_iter();
            for strip_row in active {
                for col in 0..columns {
                    snap.layout.strips[strip_row][col] = picks.next();
                }
            }
            snap.layout.order = orders;
        })
    }

    /// Change the board size. Strip contents are truncated or padded with
    /// empty cells to the new column count; the row order is regenerated
    /// with the alternating default.
    pub fn resize(&mut self, size: BoardSize) -> bool {
        self.commit(|snap| {
            snap.size = size;
            for strip in &mut snap.layout.strips {
                strip.resize(size.columns(), None);
            }
            snap.layout.strips.resize(STRIP_COUNT, vec![None; size.columns()]);
            snap.layout.order = BoardLayout::default_order(size);
        })
    }

    /// Restore the most recent pre-mutation state. No-op when nothing is
    /// left to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                self.future.push(std::mem::replace(&mut self.current, prev));
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone state. No-op when nothing was undone.
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                self.history.push(std::mem::replace(&mut self.current, next));
                true
            }
            None => false,
        }
    }

    fn strip_active(&self, strip_row: usize) -> bool {
        BoardLayout::active_strips(self.current.strip3_enabled).contains(&strip_row)
    }
}
