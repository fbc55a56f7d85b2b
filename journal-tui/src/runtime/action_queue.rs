use journal_api::EntryId;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work that needs the network, queued by key handlers and drained by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Action {
    Login,
    Register,
    LoadEntries,
    AddEntry,
    DeleteEntry(EntryId),
    SaveEdit(EntryId),
    Search,
    ClearSearch,
    LoadAdmin,
    CreateAdmin,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
