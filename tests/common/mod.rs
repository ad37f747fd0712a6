//! Shared helpers: a wiremock server hosted on its own tokio runtime so the
//! blocking client can be driven from plain `#[test]` functions.

#![allow(dead_code)]

use serde_json::{json, Value};
use tokio::runtime::Runtime;
use vintage_cars::api::CarsClient;
use vintage_cars::config::ClientConfig;
use vintage_cars::prompt::{Screen, ScriptedInput};
use vintage_cars::ui::{Exit, Session};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct MockApi {
    // Declared before the runtime so expectations are verified while it is
    // still alive.
    pub server: MockServer,
    rt: Runtime,
}

impl MockApi {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("tokio runtime");
        let server = rt.block_on(MockServer::start());
        MockApi { server, rt }
    }

    /// A server whose root answers the connectivity probe.
    pub fn online() -> Self {
        let api = Self::start();
        api.mount(
            Mock::given(method("HEAD"))
                .and(path("/"))
                .respond_with(ResponseTemplate::new(200)),
        );
        api
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.server.uri(), "cars", 3).expect("valid config")
    }

    pub fn client(&self) -> CarsClient {
        CarsClient::new(self.config()).expect("client")
    }

    pub fn received(&self) -> Vec<wiremock::Request> {
        self.rt
            .block_on(self.server.received_requests())
            .expect("request recording enabled")
    }

    pub fn received_methods(&self) -> Vec<String> {
        self.received()
            .iter()
            .map(|r| r.method.to_string())
            .collect()
    }
}

pub struct Transcript {
    pub exit: Exit,
    pub output: String,
    pub input: ScriptedInput,
}

impl Transcript {
    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }

    /// Lines printed between the first menu and the next one (or the end).
    pub fn first_action_output(&self) -> Vec<&str> {
        let lines = self.lines();
        let start = lines
            .iter()
            .position(|l| *l == "0. Exit")
            .expect("menu printed")
            + 1;
        lines[start..]
            .iter()
            .take_while(|l| !l.starts_with("+ ---"))
            .copied()
            .collect()
    }
}

pub fn run_session<I, S>(client: &CarsClient, lines: I) -> Transcript
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let input = ScriptedInput::new(lines);
    let screen = Screen::new(Vec::new(), false);
    let mut session = Session::new(client, input, screen);
    let exit = session.run().expect("session runs to completion");
    let (input, screen) = session.into_parts();
    Transcript {
        exit,
        output: String::from_utf8(screen.into_inner()).expect("utf-8 output"),
        input,
    }
}

pub fn car_json(id: Value, brand: &str, model: &str, year: u16, convertible: bool) -> Value {
    json!({
        "id": id,
        "brand": brand,
        "model": model,
        "production_year": year,
        "convertible": convertible
    })
}
