use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use ecotrack_advice::{
    fallback_advice, AdviceConfig, AdviceError, AdvicePipeline, BillScanOutcome, ChatRole,
    ChatSession, GenerationRequest, GenerativeModel, ModelError, ResponseFormat,
};
use ecotrack_core::{
    CarbonState, CarbonStore, ElectricityInput, LpgInput, MemorySnapshotStore, TransportMode,
    TravelInput,
};

struct ScriptedModel {
    reply: Result<String, ModelError>,
    delay: Duration,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModel {
    fn replying(raw: &str) -> Self {
        ScriptedModel {
            reply: Ok(raw.to_string()),
            delay: Duration::ZERO,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        ScriptedModel {
            reply: Err(ModelError::Unavailable("connection refused".into())),
            delay: Duration::ZERO,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn slow(raw: &str, delay: Duration) -> Self {
        ScriptedModel {
            delay,
            ..Self::replying(raw)
        }
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError> {
        self.seen.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }
}

fn pipeline(model: ScriptedModel) -> AdvicePipeline<ScriptedModel> {
    AdvicePipeline::new(
        model,
        AdviceConfig {
            request_timeout: Duration::from_millis(50),
            ..AdviceConfig::default()
        },
    )
}

fn seeded_store() -> CarbonStore<MemorySnapshotStore> {
    let state = CarbonState {
        travel: TravelInput {
            mode: TransportMode::Car,
            distance_km: 10.0,
            days_per_week: 5,
        },
        electricity: ElectricityInput { monthly_kwh: 200.0 },
        lpg: LpgInput {
            cylinders_per_year: 12.0,
        },
    };
    CarbonStore::open(MemorySnapshotStore::with_snapshot(
        serde_json::to_string(&state).unwrap(),
    ))
}

const GOOD_ADVICE: &str = r#"[
    {"tip":"Take the bus twice a week","category":"Travel"},
    {"tip":"Set the AC to 26 degrees","category":"Electricity"},
    {"tip":"Use a pressure cooker","category":"LPG"}
]"#;

#[tokio::test]
async fn advice_uses_parsed_reply_and_sends_summary() {
    let store = seeded_store();
    let p = pipeline(ScriptedModel::replying(GOOD_ADVICE));
    let tips = p.personalized_advice(&store.summary()).await;
    assert_eq!(tips.len(), 3);
    assert_eq!(tips[2].category, "LPG");
}

#[tokio::test]
async fn advice_request_carries_numbers_and_schema() {
    let store = seeded_store();
    let model = ScriptedModel::replying(GOOD_ADVICE);
    let p = AdvicePipeline::new(&model, AdviceConfig::default());
    p.personalized_advice(&store.summary()).await;

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].response_format, ResponseFormat::AdviceList);
    assert!(requests[0].turns[0].text.contains("Total: 247.28"));
    assert_eq!(requests[0].model, "gemini-3-flash-preview");
}

#[tokio::test]
async fn advice_falls_back_on_service_error() {
    let p = pipeline(ScriptedModel::failing());
    let tips = p.personalized_advice(&seeded_store().summary()).await;
    assert_eq!(tips, fallback_advice());
}

#[tokio::test]
async fn advice_falls_back_on_malformed_reply() {
    for raw in ["", "Sure! Here are some tips:", "{\"tips\": []}", "[]"] {
        let p = pipeline(ScriptedModel::replying(raw));
        let tips = p.personalized_advice(&seeded_store().summary()).await;
        assert_eq!(tips, fallback_advice(), "reply {raw:?}");
    }
}

#[tokio::test]
async fn advice_falls_back_when_service_is_slow() {
    let p = pipeline(ScriptedModel::slow(GOOD_ADVICE, Duration::from_secs(5)));
    let tips = p.personalized_advice(&seeded_store().summary()).await;
    assert_eq!(tips, fallback_advice());
}

#[tokio::test]
async fn roadmap_reports_malformed_and_timeout() {
    let store = seeded_store();
    let ok = pipeline(ScriptedModel::replying(
        r#"[{"title":"Commute by bus","description":"Swap two car days",
             "impact":"16 kg CO2/month","timeline":"Week 1"}]"#,
    ));
    let steps = ok
        .impact_roadmap(&store.get(), &store.summary())
        .await
        .unwrap();
    assert_eq!(steps[0].impact, "16 kg CO2/month");

    let bad = pipeline(ScriptedModel::replying("[{\"title\": 3}]"));
    assert!(matches!(
        bad.impact_roadmap(&store.get(), &store.summary()).await,
        Err(AdviceError::Malformed(_))
    ));

    let slow = pipeline(ScriptedModel::slow("[]", Duration::from_secs(5)));
    assert!(matches!(
        slow.impact_roadmap(&store.get(), &store.summary()).await,
        Err(AdviceError::Timeout(_))
    ));
}

#[tokio::test]
async fn bill_scan_reading_patches_electricity_only() {
    let mut store = seeded_store();
    let before = store.get();
    let model = ScriptedModel::replying(r#"{"kwh": 310}"#);
    let p = AdvicePipeline::new(&model, AdviceConfig::default());

    let outcome = p
        .scan_bill_into(&mut store, "image/jpeg", b"\xff\xd8\xff")
        .await
        .unwrap();
    assert_eq!(outcome, BillScanOutcome::Reading(310.0));
    let after = store.get();
    assert_eq!(after.electricity.monthly_kwh, 310.0);
    assert_eq!(after.travel, before.travel);
    assert_eq!(after.lpg, before.lpg);

    let sent = model.requests();
    let attachment = sent[0].attachment.as_ref().unwrap();
    assert_eq!(attachment.mime_type, "image/jpeg");
    assert_eq!(attachment.data_base64, "/9j/");
    assert_eq!(sent[0].response_format, ResponseFormat::BillScan);
}

#[tokio::test]
async fn bill_scan_without_reading_leaves_store_alone() {
    let mut store = seeded_store();
    let before = store.get();
    let p = pipeline(ScriptedModel::replying(r#"{"error":"no units printed"}"#));
    let outcome = p
        .scan_bill_into(&mut store, "image/png", b"png")
        .await
        .unwrap();
    assert_eq!(outcome, BillScanOutcome::NotFound("no units printed".into()));
    assert_eq!(store.get(), before);

    let failing = pipeline(ScriptedModel::failing());
    assert!(matches!(
        failing.scan_bill_into(&mut store, "image/png", b"png").await,
        Err(AdviceError::Model(_))
    ));
    assert_eq!(store.get(), before);
}

#[tokio::test]
async fn chat_keeps_history_and_apologises_on_failure() {
    let model = ScriptedModel::replying("  Try line-drying clothes.  ");
    let p = AdvicePipeline::new(&model, AdviceConfig::default());
    let mut chat = ChatSession::new();

    assert!(matches!(
        chat.send(&p, "   ").await,
        Err(AdviceError::EmptyMessage)
    ));
    assert!(chat.history().is_empty());

    let reply = chat.send(&p, "How do I save power?").await.unwrap();
    assert_eq!(reply.role, ChatRole::Model);
    assert_eq!(reply.text, "Try line-drying clothes.");
    chat.send(&p, "Anything else?").await.unwrap();

    let sent = model.requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].turns.len(), 3);
    assert!(sent[1].system_instruction.is_some());

    let down = pipeline(ScriptedModel::failing());
    let mut chat = ChatSession::new();
    let reply = chat.send(&down, "hello").await.unwrap();
    assert_eq!(reply.text, "Oops! I am having trouble connecting right now.");

    let empty = pipeline(ScriptedModel::replying(""));
    let reply = chat.send(&empty, "hello again").await.unwrap();
    assert_eq!(reply.text, "Sorry, I encountered an error.");
    assert_eq!(chat.history().len(), 4);
}
