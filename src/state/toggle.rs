#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ToggleValue<'a> {
    Flag(bool),
    Choice(Option<&'a str>),
}

/// Either a boolean flag or a walk through a fixed list of options.
///
/// A cycle does not wrap: once every option has been visited the current
/// value is `None` and further toggles keep it there.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Toggle {
    Flag(bool),
    Cycle { options: Vec<String>, index: usize },
}

impl Toggle {
    pub fn flag(initial: bool) -> Self {
        Toggle::Flag(initial)
    }

    pub fn cycle<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Toggle::Cycle {
            options: options.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }

    pub fn toggle(&mut self) {
        match self {
            Toggle::Flag(value) => *value = !*value,
            Toggle::Cycle { index, .. } => *index = index.saturating_add(1),
        }
    }

    pub fn current(&self) -> ToggleValue<'_> {
        match self {
            Toggle::Flag(value) => ToggleValue::Flag(*value),
            Toggle::Cycle { options, index } => {
                ToggleValue::Choice(options.get(*index).map(String::as_str))
            }
        }
    }
}
