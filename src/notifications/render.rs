// SPDX-License-Identifier: MPL-2.0
//! Boundary between the notification store and whatever draws toasts.

use super::notification::Notification;

/// Opaque handle to the shared notification container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerHandle(pub u64);

/// Opaque handle to one rendered notification element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Draws notifications.
///
/// The element produced by [`Renderer::render`] must carry a close
/// affordance that the host wires to
/// [`Message::Dismiss`](super::Message::Dismiss) with the notification's id.
pub trait Renderer {
    /// Creates the container all notifications are stacked in.
    ///
    /// Called at most once per store, on the first notification.
    fn create_container(&mut self) -> ContainerHandle;

    /// Mounts a dismissible element for `notification` inside `container`.
    fn render(&mut self, container: ContainerHandle, notification: &Notification) -> ElementHandle;

    /// Starts the exit animation. The element stays attached until
    /// [`Renderer::unmount`].
    fn begin_exit(&mut self, _element: ElementHandle) {}

    /// Detaches the element from the container.
    fn unmount(&mut self, element: ElementHandle);
}
