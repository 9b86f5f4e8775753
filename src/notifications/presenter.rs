// SPDX-License-Identifier: MPL-2.0
//! Boundary with whatever draws the toast.
//!
//! The manager only tells a presenter to show or remove a view. The
//! presenter reports back through [`Manager::tapped`] and
//! [`Manager::finished_hiding`] (or the matching `ToastHandle` calls when
//! the manager runs inside a `ToastService`).
//!
//! [`Manager::tapped`]: super::Manager::tapped
//! [`Manager::finished_hiding`]: super::Manager::finished_hiding

use super::toast::ToastValue;

/// Result of asking a presenter to remove a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The view is already gone.
    Done,
    /// A hide animation started; `finished_hiding` follows.
    Pending,
}

/// Renders the active toast.
pub trait Presenter: Send {
    /// Shows a floating view with the toast's text.
    fn present(&mut self, toast: &ToastValue);

    /// Starts removing the view of `toast`.
    fn remove(&mut self, toast: &ToastValue) -> Removal;
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, toast: &ToastValue) {
        (**self).present(toast);
    }

    fn remove(&mut self, toast: &ToastValue) -> Removal {
        (**self).remove(toast)
    }
}

/// Headless presenter that writes toasts to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&mut self, toast: &ToastValue) {
        tracing::info!(id = %toast.id(), text = toast.text(), "toast shown");
    }

    fn remove(&mut self, toast: &ToastValue) -> Removal {
        tracing::info!(id = %toast.id(), "toast removed");
        Removal::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_presenter_removes_synchronously() {
        let mut presenter = LogPresenter;
        let toast = ToastValue::new("headless");
        presenter.present(&toast);
        assert_eq!(presenter.remove(&toast), Removal::Done);
    }

    #[test]
    fn boxed_presenter_delegates() {
        let mut presenter: Box<dyn Presenter> = Box::new(LogPresenter);
        let toast = ToastValue::new("boxed");
        presenter.present(&toast);
        assert_eq!(presenter.remove(&toast), Removal::Done);
    }
}
