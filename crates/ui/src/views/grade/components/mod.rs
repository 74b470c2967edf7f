mod download;
mod modals;
mod processing;
mod upload;

pub(crate) use download::DownloadPanel;
pub(crate) use modals::FeedbackModal;
pub(crate) use processing::ProcessingPanel;
pub(crate) use upload::UploadPanel;
