use std::fmt;

use super::widgets::or_dash;
use crate::presentation::view_models::{
    ItemExplanationResultViewModel, ItemExplanationViewModel, ReviewItemViewModel,
    ReviewOutcomeViewModel, ReviewQueueViewModel,
};

pub struct ReviewItemView<'a> {
    data: &'a ReviewItemViewModel,
}

impl<'a> ReviewItemView<'a> {
    pub fn new(data: &'a ReviewItemViewModel) -> Self {
        Self { data }
    }
}

impl fmt::Display for ReviewItemView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let item = self.data;
        match &item.provider_name {
            Some(name) => writeln!(
                f,
                "#{}  {} · {} (provider #{})",
                item.id, name, item.field_name, item.provider_id
            )?,
            None => writeln!(
                f,
                "#{}  provider #{} · {}",
                item.id, item.provider_id, item.field_name
            )?,
        }
        writeln!(f, "    current:   {}", or_dash(item.current_value.as_deref()))?;
        writeln!(f, "    suggested: {}", or_dash(item.suggested_value.as_deref()))?;
        if let Some(reason) = &item.reason {
            writeln!(f, "    reason:    {reason}")?;
        }
        if let Some(created_at) = &item.created_at {
            writeln!(f, "    flagged:   {created_at}")?;
        }
        match &item.explanation {
            Some(ItemExplanationViewModel::Loading) => writeln!(f, "    Generating explanation...")?,
            Some(ItemExplanationViewModel::Ready(text)) => writeln!(f, "    → {text}")?,
            Some(ItemExplanationViewModel::Failed(message)) => writeln!(f, "    ! {message}")?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for ReviewQueueViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", ReviewItemView::new(item))?;
        }
        Ok(())
    }
}

impl fmt::Display for ReviewOutcomeViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} item(s) still pending review", self.remaining)
    }
}

impl fmt::Display for ItemExplanationResultViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Item #{} · {} (suggested: {})",
            self.id,
            self.field_name,
            or_dash(self.suggested_value.as_deref())
        )?;
        writeln!(f, "{}", self.explanation)
    }
}
