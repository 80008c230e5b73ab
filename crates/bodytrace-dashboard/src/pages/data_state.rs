use bodytrace_client_core::{RequestSequence, SequenceTag};
use futures::channel::oneshot;
use tracing::{debug, error};

#[derive(Debug)]
pub struct AwaitingType<T> {
    rx: oneshot::Receiver<anyhow::Result<T>>,
    tag: SequenceTag,
}

#[derive(Debug, Default)]
pub enum DataState<T> {
    #[default]
    None,
    AwaitingResponse(AwaitingType<T>),
    Present(T),
    Failed(String),
}

impl<T> DataState<T> {
    /// Checks for the response without blocking. Returns the new state once
    /// something arrived, a response to a superseded request gives
    /// [`DataState::None`] so that the caller fetches again.
    pub fn await_data(
        ui: Option<&mut egui::Ui>,
        awaiting: &mut AwaitingType<T>,
        sequence: &RequestSequence,
    ) -> Option<Self> {
        Some(match awaiting.rx.try_recv() {
            Ok(Some(outcome_result)) => {
                if !sequence.is_latest(awaiting.tag) {
                    debug!(tag = ?awaiting.tag, "discarding response to superseded request");
                    return Some(DataState::None);
                }
                match outcome_result {
                    Ok(data) => DataState::Present(data),
                    Err(e) => {
                        let err_msg = format!("{e:#}");
                        error!(err_msg, "Error response received instead of the data");
                        DataState::Failed(err_msg)
                    }
                }
            }
            Ok(None) => {
                if let Some(ui) = ui {
                    ui.spinner();
                }
                return None;
            }
            Err(e) => {
                let err_msg = format!("Error receiving on channel. Error: {e:?}");
                error!(err_msg, "Error receiving on channel");
                DataState::Failed(err_msg)
            }
        })
    }

    /// Returns `true` if the data state is [`Present`].
    ///
    /// [`Present`]: DataState::Present
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(..))
    }

    #[must_use]
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingResponse(..))
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            Self::Present(data) => Some(data),
            _ => None,
        }
    }
}

/// One piece of data a page loads from the server with at most one request
/// outstanding
#[derive(Debug)]
pub struct DataSlot<T> {
    state: DataState<T>,
    sequence: RequestSequence,
}

impl<T> Default for DataSlot<T> {
    fn default() -> Self {
        Self {
            state: DataState::None,
            sequence: RequestSequence::default(),
        }
    }
}

impl<T> DataSlot<T> {
    pub fn state(&self) -> &DataState<T> {
        &self.state
    }

    pub fn present(&self) -> Option<&T> {
        self.state.present()
    }

    pub fn is_awaiting(&self) -> bool {
        self.state.is_awaiting()
    }

    /// Attempts to load the data
    ///
    /// Sends the request if nothing has been requested yet, otherwise polls
    /// for the response. If a ui is passed then spinners and error messages
    /// will show as applicable. Does nothing once the data is present.
    pub fn get<F>(&mut self, ui: Option<&mut egui::Ui>, retry_msg: Option<&str>, fetch_fn: F)
    where
        F: FnOnce() -> oneshot::Receiver<anyhow::Result<T>>,
    {
        match &mut self.state {
            DataState::None => {
                if let Some(ui) = ui {
                    ui.spinner();
                }
                self.send(fetch_fn());
            }
            DataState::AwaitingResponse(_) => self.poll(ui),
            DataState::Present(_) => {}
            DataState::Failed(e) => {
                if let Some(ui) = ui {
                    ui.colored_label(ui.visuals().error_fg_color, format!("Request failed: {e}"));
                    if ui.button(retry_msg.unwrap_or("Retry Request")).clicked() {
                        self.state = DataState::None;
                    }
                }
            }
        }
    }

    /// Replaces whatever is in the slot with the response to a new request
    pub fn send(&mut self, rx: oneshot::Receiver<anyhow::Result<T>>) {
        let tag = self.sequence.issue();
        self.state = DataState::AwaitingResponse(AwaitingType { rx, tag });
    }

    /// Moves to the next state if the outstanding request has completed
    pub fn poll(&mut self, ui: Option<&mut egui::Ui>) {
        if let DataState::AwaitingResponse(awaiting) = &mut self.state {
            if let Some(new_state) = DataState::await_data(ui, awaiting, &self.sequence) {
                self.state = new_state;
            }
        }
    }

    /// The parameters changed. Data already loaded is dropped and a request
    /// still in flight becomes stale, its response will be discarded and the
    /// data fetched again.
    pub fn refresh(&mut self) {
        self.sequence.invalidate();
        if !self.state.is_awaiting() {
            self.state = DataState::None;
        }
    }

    /// Back to the initial state, any request in flight is abandoned
    pub fn clear(&mut self) {
        self.sequence.invalidate();
        self.state = DataState::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(slot: &mut DataSlot<u32>) -> oneshot::Sender<anyhow::Result<u32>> {
        let (tx, rx) = oneshot::channel();
        slot.send(rx);
        tx
    }

    #[test]
    fn response_becomes_present() {
        // Arrange
        let mut slot = DataSlot::default();
        let tx = sent(&mut slot);

        // Act
        slot.poll(None);
        let before = slot.is_awaiting();
        tx.send(Ok(7)).unwrap();
        slot.poll(None);

        // Assert
        assert!(before);
        assert_eq!(slot.present(), Some(&7));
    }

    #[test]
    fn error_keeps_message() {
        // Arrange
        let mut slot = DataSlot::<u32>::default();
        let tx = sent(&mut slot);

        // Act
        tx.send(Err(anyhow::anyhow!("Invalid credentials").context("failed to login")))
            .unwrap();
        slot.poll(None);

        // Assert
        match slot.state() {
            DataState::Failed(msg) => assert_eq!(msg, "failed to login: Invalid credentials"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn refresh_while_in_flight_discards_response() {
        // Arrange
        let mut slot = DataSlot::default();
        let tx = sent(&mut slot);

        // Act
        slot.refresh();
        let still_awaiting = slot.is_awaiting();
        tx.send(Ok(1)).unwrap();
        slot.poll(None);

        // Assert
        assert!(still_awaiting);
        assert!(matches!(slot.state(), DataState::None));
    }

    #[test]
    fn newer_request_wins() {
        // Arrange
        let mut slot = DataSlot::default();
        let _old_tx = sent(&mut slot);

        // Act
        let new_tx = sent(&mut slot);
        new_tx.send(Ok(2)).unwrap();
        slot.poll(None);

        // Assert
        assert_eq!(slot.present(), Some(&2));
    }

    #[test]
    fn dropped_sender_is_failure() {
        // Arrange
        let mut slot = DataSlot::<u32>::default();
        let tx = sent(&mut slot);

        // Act
        drop(tx);
        slot.poll(None);

        // Assert
        assert!(matches!(slot.state(), DataState::Failed(_)));
    }
}
