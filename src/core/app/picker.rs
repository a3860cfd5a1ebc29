use crate::core::registry::{self, AgentDescriptor, Provider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerRow {
    Header(Provider),
    Agent(&'static AgentDescriptor),
}

impl PickerRow {
    pub fn is_selectable(&self) -> bool {
        matches!(self, PickerRow::Agent(_))
    }
}

/// Agent selector popup. Rows mirror the registry grouping; the cursor
/// only ever rests on agent rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentPickerState {
    rows: Vec<PickerRow>,
    selected: usize,
}

impl AgentPickerState {
    pub fn new(current_id: &str) -> Self {
        let mut rows = Vec::new();
        for (provider, agents) in registry::grouped() {
            rows.push(PickerRow::Header(provider));
            rows.extend(agents.into_iter().map(PickerRow::Agent));
        }

        let selected = rows
            .iter()
            .position(|row| matches!(row, PickerRow::Agent(agent) if agent.id == current_id))
            .or_else(|| rows.iter().position(PickerRow::is_selectable))
            .unwrap_or(0);

        Self { rows, selected }
    }

    pub fn rows(&self) -> &[PickerRow] {
        &self.rows
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_agent(&self) -> Option<&'static AgentDescriptor> {
        match self.rows.get(self.selected) {
            Some(PickerRow::Agent(agent)) => Some(agent),
            _ => None,
        }
    }

    pub fn move_down(&mut self) {
        self.step(1);
    }

    pub fn move_up(&mut self) {
        self.step(self.rows.len().saturating_sub(1));
    }

    fn step(&mut self, offset: usize) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let mut index = self.selected;
        for _ in 0..len {
            index = (index + offset) % len;
            if self.rows[index].is_selectable() {
                self.selected = index;
                return;
            }
        }
    }
}
