#![allow(dead_code)]

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::post,
};
use http_body_util::BodyExt;
use jornageo::{
    application::{
        AppContext,
        content::ContentLoader,
        registration::RegistrationSubmitter,
        render::{ContentRenderer, RenderOptions},
    },
    infra::{
        content_source::FileContentSource, registration_client::HttpRegistrationGateway,
    },
};
use reqwest::{Client, Url};
use serde_json::Value;

pub const DOCUMENT: &str = r#"{
    "hero": {
        "tag": "Evento <b>Acadêmico</b>",
        "title": "JornaGEO 2025",
        "description": "Geotecnologias & gestão",
        "primaryButton": "Inscreva-se",
        "secondaryButton": "Programação",
        "stats": {"participants": 200, "participantsLabel": "Participantes", "days": "2", "daysLabel": "Dias"}
    },
    "about": {
        "title": "Sobre",
        "subtitle": "",
        "mainTitle": "Dados espaciais",
        "description": "Descrição",
        "features": [{"title": "<script>alert(1)</script>", "description": "Oficinas"}]
    },
    "schedule": {
        "title": "Programação",
        "subtitle": "Dois dias",
        "days": [{"day": "Dia 1", "date": "10/11", "sessions": [
            {"time": "09:00", "title": "Abertura", "speaker": "Maria"},
            {"time": "10:00", "title": "Mesa", "speakers": [{"name": "Ana", "photo": "ana.jpg"}]},
            {"time": "12:00", "title": "Almoço"}
        ]}]
    },
    "registration": {
        "title": "Inscrições",
        "subtitle": "Vagas limitadas",
        "price": "Gratuito",
        "includes": ["Certificado", "Coffee break"],
        "form": {"fields": [
            {"name": "name", "label": "Nome", "type": "text", "required": true},
            {"name": "email", "label": "E-mail", "type": "email", "required": true},
            {"name": "phone", "label": "Telefone", "type": "tel", "required": false},
            {"name": "management_area", "label": "Área", "type": "select", "required": true,
             "options": ["Planejamento", "Meio ambiente"]},
            {"name": "newsletter", "label": "Novidades", "type": "checkbox", "required": false}
        ]}
    },
    "coordination": {
        "title": "Coordenação",
        "coordinators": [
            {"section": "Geral", "name": "Carlos", "photo": "c.jpg", "lattes": "http://lattes.cnpq.br/1"},
            {"section": "Secretaria", "name": "Daniel", "photo": "d.jpg", "lattes": "http://lattes.cnpq.br/2", "phone": "(41) 3360-0000"}
        ]
    }
}"#;

pub fn write_document(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("content.json");
    std::fs::write(&path, body).expect("write content document");
    path
}

pub fn app_context(content: PathBuf, endpoint: Url, options: RenderOptions) -> AppContext {
    let loader = ContentLoader::new(
        Arc::new(FileContentSource::new(content)),
        ContentRenderer::new(options),
    );
    let gateway = HttpRegistrationGateway::new(Client::new(), endpoint);
    AppContext::new(
        Arc::new(loader),
        Arc::new(RegistrationSubmitter::new(Arc::new(gateway))),
    )
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.expect("collect body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

/// A request the stub endpoint received.
#[derive(Debug, Clone)]
pub struct Received {
    pub content_type: Option<String>,
    pub body: Value,
}

/// Local stand-in for the remote registration endpoint.
#[derive(Clone)]
pub struct StubEndpoint {
    pub url: Url,
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<Received>>>,
}

impl StubEndpoint {
    pub async fn spawn(status: StatusCode, body: &'static str) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub endpoint");
        let addr = listener.local_addr().expect("stub address");

        let stub = Self {
            url: register_url(addr),
            status,
            body,
            received: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/register", post(stub_register))
            .with_state(stub.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub endpoint serves");
        });
        stub
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().expect("received lock").clone()
    }
}

async fn stub_register(
    State(stub): State<StubEndpoint>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    stub.received
        .lock()
        .expect("received lock")
        .push(Received { content_type, body });

    (stub.status, [(CONTENT_TYPE, "application/json")], stub.body).into_response()
}

/// An endpoint URL nothing listens on.
pub async fn offline_endpoint() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    register_url(addr)
}

fn register_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}/register")).expect("endpoint url")
}
