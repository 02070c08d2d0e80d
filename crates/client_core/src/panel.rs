use crate::render::ResultView;

/// A region of the surface that keeps its last content while hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<T> {
    content: Option<T>,
    visible: bool,
}

impl<T> Default for Region<T> {
    fn default() -> Self {
        Self {
            content: None,
            visible: false,
        }
    }
}

impl<T> Region<T> {
    fn show(&mut self, content: T) {
        self.content = Some(content);
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn visible_content(&self) -> Option<&T> {
        self.content.as_ref().filter(|_| self.visible)
    }
}

/// Result and error regions. The two are toggled independently; callers
/// clear both before an operation and reveal at most one afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPanel {
    results: Region<ResultView>,
    error: Region<String>,
}

impl StatusPanel {
    pub fn hide_results(&mut self) {
        self.results.hide();
    }

    pub fn hide_error(&mut self) {
        self.error.hide();
    }

    pub fn show_results(&mut self, view: ResultView) {
        self.results.show(view);
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error.show(message.into());
    }

    pub fn results(&self) -> &Region<ResultView> {
        &self.results
    }

    pub fn error(&self) -> &Region<String> {
        &self.error
    }

    pub fn visible_results(&self) -> Option<&ResultView> {
        self.results.visible_content()
    }

    pub fn visible_error(&self) -> Option<&str> {
        self.error.visible_content().map(String::as_str)
    }
}
