//! Embed-and-send orchestration
//!
//! Chains upload → signature field → embedded session → notification against
//! the signing gateway. Steps run strictly in order; the first failure is
//! returned unchanged and nothing after it runs. Nothing already done at the
//! provider is rolled back.

use std::future::Future;
use std::sync::Arc;

use serde_json::json;
use signflow_core::models::{
    Credential, DocumentReference, EmbedSendResult, EmbeddedSession, NotificationPayload,
    SignatureFieldSpec, UploadedFile, WorkflowMode,
};
use signflow_core::{AppError, SessionOptions};
use signflow_gateway::{GatewayError, SigningGateway};
use signflow_infra::NotificationSink;
use tokio_util::sync::CancellationToken;

const NO_FILE: &str = "No file provided.";

/// Per-call context: trace id forwarded to the recorder and the caller's
/// cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    pub trace_id: Option<String>,
    pub cancel: CancellationToken,
}

impl CallContext {
    pub fn new(trace_id: Option<String>, cancel: CancellationToken) -> Self {
        Self { trace_id, cancel }
    }

    fn meta(&self) -> serde_json::Value {
        json!({ "traceId": self.trace_id })
    }
}

/// Race one gateway call against cancellation.
async fn guarded<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, GatewayError>>,
) -> Result<T, AppError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        result = call => result.map_err(AppError::from),
    }
}

fn require_file(file: Option<UploadedFile>) -> Result<UploadedFile, AppError> {
    file.filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::InvalidInput(NO_FILE.to_string()))
}

pub struct EmbedSendService {
    gateway: Arc<dyn SigningGateway>,
    sink: Arc<dyn NotificationSink>,
    session: SessionOptions,
}

impl EmbedSendService {
    pub fn new(
        gateway: Arc<dyn SigningGateway>,
        sink: Arc<dyn NotificationSink>,
        session: SessionOptions,
    ) -> Self {
        Self {
            gateway,
            sink,
            session,
        }
    }

    /// Full chain with the default signature field.
    pub async fn embed_and_send(
        &self,
        file: Option<UploadedFile>,
        credential: &Credential,
        workflow: Option<&str>,
        uploader_user_id: Option<String>,
        ctx: &CallContext,
    ) -> Result<EmbedSendResult, AppError> {
        self.embed_and_send_with_field(
            file,
            credential,
            workflow,
            uploader_user_id,
            SignatureFieldSpec::default(),
            ctx,
        )
        .await
    }

    #[tracing::instrument(skip_all, fields(workflow = ?workflow))]
    pub async fn embed_and_send_with_field(
        &self,
        file: Option<UploadedFile>,
        credential: &Credential,
        workflow: Option<&str>,
        uploader_user_id: Option<String>,
        field: SignatureFieldSpec,
        ctx: &CallContext,
    ) -> Result<EmbedSendResult, AppError> {
        let file = require_file(file)?;
        let mode = WorkflowMode::parse(workflow)?;

        let document = guarded(&ctx.cancel, self.gateway.upload(&file, credential)).await?;
        tracing::info!(document_id = %document, size = file.size(), "Upload step complete");

        guarded(
            &ctx.cancel,
            self.gateway.add_signature_field(&document, credential, &field),
        )
        .await?;

        let session = guarded(
            &ctx.cancel,
            self.gateway
                .create_embedded_session(&document, credential, &self.session),
        )
        .await?;

        let payload = NotificationPayload::for_upload(
            &document,
            mode,
            &file,
            &session,
            uploader_user_id,
            ctx.meta(),
        );
        self.notify(&payload, ctx).await;

        tracing::info!(document_id = %document, workflow = %mode, "Embedded sending ready");
        Ok(EmbedSendResult {
            document_id: document.into_inner(),
            embedded_sending_url: session.url,
        })
    }

    pub async fn upload_only(
        &self,
        file: Option<UploadedFile>,
        credential: &Credential,
        ctx: &CallContext,
    ) -> Result<DocumentReference, AppError> {
        let file = require_file(file)?;
        guarded(&ctx.cancel, self.gateway.upload(&file, credential)).await
    }

    pub async fn add_field_only(
        &self,
        document: &DocumentReference,
        credential: &Credential,
        field: &SignatureFieldSpec,
        ctx: &CallContext,
    ) -> Result<(), AppError> {
        guarded(
            &ctx.cancel,
            self.gateway.add_signature_field(document, credential, field),
        )
        .await
    }

    pub async fn create_session_only(
        &self,
        document: &DocumentReference,
        credential: &Credential,
        ctx: &CallContext,
    ) -> Result<EmbeddedSession, AppError> {
        guarded(
            &ctx.cancel,
            self.gateway
                .create_embedded_session(document, credential, &self.session),
        )
        .await
    }

    /// Session for an already-uploaded document, reported without file metadata.
    #[tracing::instrument(skip_all, fields(document_id = %document))]
    pub async fn create_session_and_report(
        &self,
        document: &DocumentReference,
        credential: &Credential,
        workflow: Option<&str>,
        uploader_user_id: Option<String>,
        ctx: &CallContext,
    ) -> Result<EmbedSendResult, AppError> {
        let mode = WorkflowMode::parse(workflow)?;
        let session = self.create_session_only(document, credential, ctx).await?;

        let payload =
            NotificationPayload::for_session(document, mode, &session, uploader_user_id, ctx.meta());
        self.notify(&payload, ctx).await;

        Ok(EmbedSendResult {
            document_id: document.as_str().to_string(),
            embedded_sending_url: session.url,
        })
    }

    /// Hand the payload to the sink. The result is already fixed: cancellation
    /// only abandons the delivery.
    async fn notify(&self, payload: &NotificationPayload, ctx: &CallContext) {
        tokio::select! {
            _ = ctx.cancel.cancelled() => {
                tracing::warn!(
                    document_id = %payload.sign_now_document_id,
                    "Notification abandoned on cancellation"
                );
            }
            _ = self.sink.report(payload) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use signflow_core::models::RawResponse;
    use signflow_gateway::DownloadedDocument;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeGateway {
        calls: Mutex<Vec<&'static str>>,
        fail_upload: Option<(u16, &'static str)>,
        fail_field: Option<(u16, &'static str)>,
        session_protocol_error: bool,
        hang_on_field: bool,
    }

    impl FakeGateway {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn rejected((status, body): (u16, &'static str)) -> GatewayError {
        GatewayError::Rejected {
            status,
            body: body.to_string(),
        }
    }

    #[async_trait]
    impl SigningGateway for FakeGateway {
        async fn upload(
            &self,
            _file: &UploadedFile,
            _credential: &Credential,
        ) -> Result<DocumentReference, GatewayError> {
            self.record("upload");
            match self.fail_upload {
                Some(failure) => Err(rejected(failure)),
                None => Ok(DocumentReference::new("doc-1").unwrap()),
            }
        }

        async fn add_signature_field(
            &self,
            _document: &DocumentReference,
            _credential: &Credential,
            _spec: &SignatureFieldSpec,
        ) -> Result<(), GatewayError> {
            self.record("field");
            if self.hang_on_field {
                std::future::pending::<()>().await;
            }
            match self.fail_field {
                Some(failure) => Err(rejected(failure)),
                None => Ok(()),
            }
        }

        async fn create_embedded_session(
            &self,
            document: &DocumentReference,
            _credential: &Credential,
            _options: &SessionOptions,
        ) -> Result<EmbeddedSession, GatewayError> {
            self.record("session");
            if self.session_protocol_error {
                return Err(GatewayError::Protocol(
                    "Embedded-sending response did not contain a URL.".to_string(),
                ));
            }
            Ok(EmbeddedSession {
                url: format!("https://sign.example/s/{}", document),
            })
        }

        async fn list_documents(&self, _credential: &Credential) -> Result<RawResponse, GatewayError> {
            unimplemented!()
        }

        async fn download(
            &self,
            _document: &DocumentReference,
            _credential: &Credential,
        ) -> Result<DownloadedDocument, GatewayError> {
            unimplemented!()
        }

        async fn create_signing_link(
            &self,
            _document: &DocumentReference,
            _credential: &Credential,
            _redirect_uri: Option<&str>,
        ) -> Result<RawResponse, GatewayError> {
            unimplemented!()
        }

        async fn password_grant(
            &self,
            _username: &str,
            _password: &str,
        ) -> Result<RawResponse, GatewayError> {
            unimplemented!()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        payloads: Mutex<Vec<NotificationPayload>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn report(&self, payload: &NotificationPayload) {
            self.payloads.lock().unwrap().push(payload.clone());
        }
    }

    fn service(gateway: Arc<FakeGateway>, sink: Arc<RecordingSink>) -> EmbedSendService {
        EmbedSendService::new(gateway, sink, SessionOptions::default())
    }

    fn contract() -> Option<UploadedFile> {
        Some(UploadedFile::new(
            Bytes::from_static(b"0123456789"),
            Some("contract.pdf".to_string()),
            Some("application/pdf".to_string()),
        ))
    }

    fn credential() -> Credential {
        Credential::new("tok").unwrap()
    }

    #[tokio::test]
    async fn test_successful_chain_reports_once() {
        let gateway = Arc::new(FakeGateway::default());
        let sink = Arc::new(RecordingSink::default());
        let ctx = CallContext::new(Some("req-1".to_string()), CancellationToken::new());

        let result = service(gateway.clone(), sink.clone())
            .embed_and_send(contract(), &credential(), Some("Parallel"), Some("42".into()), &ctx)
            .await
            .unwrap();

        assert_eq!(result.document_id, "doc-1");
        assert_eq!(result.embedded_sending_url, "https://sign.example/s/doc-1");
        assert_eq!(gateway.calls(), vec!["upload", "field", "session"]);

        let payloads = sink.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].sign_now_document_id, "doc-1");
        assert_eq!(payloads[0].embedded_sending_url, "https://sign.example/s/doc-1");
        assert_eq!(payloads[0].workflow, WorkflowMode::Parallel);
        assert_eq!(payloads[0].size_bytes, Some(10));
        assert_eq!(payloads[0].meta["traceId"], "req-1");
    }

    #[tokio::test]
    async fn test_invalid_mode_makes_no_gateway_call() {
        let gateway = Arc::new(FakeGateway::default());
        let sink = Arc::new(RecordingSink::default());

        let err = service(gateway.clone(), sink.clone())
            .embed_and_send(contract(), &credential(), Some("random"), None, &CallContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(gateway.calls().is_empty());
        assert!(sink.payloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_or_empty_file_makes_no_gateway_call() {
        let gateway = Arc::new(FakeGateway::default());
        let sink = Arc::new(RecordingSink::default());
        let svc = service(gateway.clone(), sink.clone());
        let empty = Some(UploadedFile::new(Bytes::new(), Some("a.pdf".into()), None));

        for file in [None, empty] {
            let err = svc
                .embed_and_send(file, &credential(), Some("parallel"), None, &CallContext::default())
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(ref m) if m == NO_FILE));
        }
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_stops_chain() {
        let gateway = Arc::new(FakeGateway {
            fail_upload: Some((413, r#"{"error":"too large"}"#)),
            ..Default::default()
        });
        let sink = Arc::new(RecordingSink::default());

        let err = service(gateway.clone(), sink.clone())
            .embed_and_send(contract(), &credential(), Some("parallel"), None, &CallContext::default())
            .await
            .unwrap_err();

        match err {
            AppError::GatewayRejected { status, body } => {
                assert_eq!(status, 413);
                assert_eq!(body, r#"{"error":"too large"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(gateway.calls(), vec!["upload"]);
        assert!(sink.payloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_field_failure_skips_session_and_notification() {
        let gateway = Arc::new(FakeGateway {
            fail_field: Some((400, r#"{"errors":[{"code":65582}]}"#)),
            ..Default::default()
        });
        let sink = Arc::new(RecordingSink::default());

        let err = service(gateway.clone(), sink.clone())
            .embed_and_send(contract(), &credential(), Some("sequential"), None, &CallContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::GatewayRejected { status: 400, .. }));
        assert_eq!(gateway.calls(), vec!["upload", "field"]);
        assert!(sink.payloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_failure_skips_notification() {
        let gateway = Arc::new(FakeGateway {
            session_protocol_error: true,
            ..Default::default()
        });
        let sink = Arc::new(RecordingSink::default());

        let err = service(gateway.clone(), sink.clone())
            .embed_and_send(contract(), &credential(), Some("parallel"), None, &CallContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::GatewayProtocol(_)));
        assert_eq!(gateway.calls(), vec!["upload", "field", "session"]);
        assert!(sink.payloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_change_result() {
        let gateway = Arc::new(FakeGateway::default());
        let sink = Arc::new(
            signflow_infra::HttpNotificationSink::new(&signflow_core::NotificationConfig {
                enabled: true,
                endpoint: "http://127.0.0.1:9/api/documents".to_string(),
                shared_secret: "s".to_string(),
                timeout_seconds: 1,
            })
            .unwrap(),
        );

        let result = EmbedSendService::new(gateway, sink, SessionOptions::default())
            .embed_and_send(contract(), &credential(), Some("parallel"), None, &CallContext::default())
            .await
            .unwrap();
        assert_eq!(result.document_id, "doc-1");
    }

    #[tokio::test]
    async fn test_cancellation_stops_chain() {
        let gateway = Arc::new(FakeGateway {
            hang_on_field: true,
            ..Default::default()
        });
        let sink = Arc::new(RecordingSink::default());
        let ctx = CallContext::default();
        let cancel = ctx.cancel.clone();

        let svc = service(gateway.clone(), sink.clone());
        let credential = credential();
        let (result, _) = tokio::join!(
            svc.embed_and_send(contract(), &credential, Some("parallel"), None, &ctx),
            async move {
                tokio::task::yield_now().await;
                cancel.cancel();
            }
        );

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert_eq!(gateway.calls(), vec!["upload", "field"]);
        assert!(sink.payloads.lock().unwrap().is_empty());
    }

    struct HangingSink;

    #[async_trait]
    impl NotificationSink for HangingSink {
        async fn report(&self, _payload: &NotificationPayload) {
            std::future::pending::<()>().await;
        }
    }

    #[tokio::test]
    async fn test_cancelled_notification_keeps_result() {
        let gateway = Arc::new(FakeGateway::default());
        let ctx = CallContext::default();
        let cancel = ctx.cancel.clone();

        let svc = EmbedSendService::new(
            gateway.clone(),
            Arc::new(HangingSink),
            SessionOptions::default(),
        );
        let credential = credential();
        let (result, _) = tokio::join!(
            svc.embed_and_send(contract(), &credential, Some("parallel"), None, &ctx),
            async move {
                tokio::task::yield_now().await;
                cancel.cancel();
            }
        );

        let result = result.unwrap();
        assert_eq!(result.document_id, "doc-1");
        assert_eq!(result.embedded_sending_url, "https://sign.example/s/doc-1");
        assert_eq!(gateway.calls(), vec!["upload", "field", "session"]);
    }

    #[tokio::test]
    async fn test_session_and_report_omits_file_metadata() {
        let gateway = Arc::new(FakeGateway::default());
        let sink = Arc::new(RecordingSink::default());
        let document = DocumentReference::new("doc-7").unwrap();

        let result = service(gateway.clone(), sink.clone())
            .create_session_and_report(
                &document,
                &credential(),
                Some("sequential"),
                Some("  ".into()),
                &CallContext::default(),
            )
            .await
            .unwrap();

        assert_eq!(result.embedded_sending_url, "https://sign.example/s/doc-7");
        assert_eq!(gateway.calls(), vec!["session"]);
        let payloads = sink.payloads.lock().unwrap();
        assert_eq!(payloads[0].original_name, None);
        assert_eq!(payloads[0].uploader_user_id, None);
    }
}
