//! The icon-setting pipeline.

use crate::api::NotionApi;
use crate::clock::{Clock, SystemClock};
use crate::error::{IconError, PipelineResult};
use crate::ids::{IdGenerator, RandomIds};
use crate::transport::HttpTransport;
use crate::wire::{SaveTransactionsRequest, UploadFileUrlRequest};
use notion_icon_types::{BinaryPayload, Credentials, IconInput, IconRequest, IconResult, PageId};
use tracing::{debug, info};

/// Outcome of a successful [`IconSetter::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconUpdate {
    pub page_id: PageId,
    /// The icon actually committed: the caller's URL or the uploaded file's URL.
    pub icon_url: String,
}

impl From<IconUpdate> for IconResult {
    fn from(update: IconUpdate) -> Self {
        IconResult::updated(&update.page_id, update.icon_url)
    }
}

/// Sets page icons, one request at a time.
///
/// Stages run strictly in order (normalize, resolve, commit) and the first
/// failure ends the request. Nothing is retried.
pub struct IconSetter<T, I = RandomIds, C = SystemClock> {
    api: NotionApi<T>,
    ids: I,
    clock: C,
}

impl<T: HttpTransport> IconSetter<T> {
    /// Creates a setter with random ids and the wall clock.
    pub fn new(api: NotionApi<T>) -> Self {
        Self::with_parts(api, RandomIds, SystemClock)
    }
}

impl<T, I, C> IconSetter<T, I, C>
where
    T: HttpTransport,
    I: IdGenerator,
    C: Clock,
{
    pub fn with_parts(api: NotionApi<T>, ids: I, clock: C) -> Self {
        Self { api, ids, clock }
    }

    #[must_use]
    pub fn api(&self) -> &NotionApi<T> {
        &self.api
    }

    /// Runs the whole pipeline for one request.
    pub async fn apply(
        &self,
        request: &IconRequest,
        credentials: &Credentials,
    ) -> PipelineResult<IconUpdate> {
        let page_id = normalize(&request.page_ref)?;
        let icon_url = self.resolve_icon(&page_id, &request.icon, credentials).await?;
        self.commit(&page_id, &icon_url, credentials).await?;

        info!(page_id = %page_id, "page icon updated");
        Ok(IconUpdate { page_id, icon_url })
    }

    /// Turns the icon input into the token to commit.
    async fn resolve_icon(
        &self,
        page_id: &PageId,
        icon: &IconInput,
        credentials: &Credentials,
    ) -> PipelineResult<String> {
        match icon {
            IconInput::Url(url) if url.trim().is_empty() => Err(IconError::MissingIconUrl),
            IconInput::Url(url) => Ok(url.clone()),
            IconInput::Upload(payload) => self.upload(page_id, payload, credentials).await,
        }
    }

    /// Uploads `payload` and returns the URL it will be served from.
    ///
    /// If the storage upload fails the slot's URL is dropped unused.
    pub async fn upload(
        &self,
        page_id: &PageId,
        payload: &BinaryPayload,
        credentials: &Credentials,
    ) -> PipelineResult<String> {
        let slot_request = UploadFileUrlRequest::for_page(
            page_id,
            &credentials.space_id,
            &payload.file_name,
            &payload.mime_type,
            payload.len(),
        );
        let slot = self.api.get_upload_file_url(credentials, &slot_request).await?;
        debug!(page_id = %page_id, file = %payload.file_name, "received upload slot");

        self.api.upload_to_storage(&slot, payload).await?;
        Ok(slot.final_attachment_url)
    }

    /// Commits the icon and touches the page's edit metadata.
    pub async fn commit(
        &self,
        page_id: &PageId,
        icon: &str,
        credentials: &Credentials,
    ) -> PipelineResult<()> {
        let envelope = SaveTransactionsRequest::set_page_icon(
            self.ids.next_id(),
            self.ids.next_id(),
            page_id,
            &credentials.space_id,
            &credentials.user_id,
            &self.api.config().user_action,
            icon,
            self.clock.now_millis(),
        );
        self.api.save_transactions(credentials, &envelope).await
    }
}

/// Normalizes a raw page reference.
pub fn normalize(raw: &str) -> PipelineResult<PageId> {
    PageId::parse(raw).map_err(|_| IconError::InvalidIdentifier {
        input: raw.to_string(),
    })
}
