//! Stdio tool server
//!
//! Line-delimited JSON-RPC 2.0 on stdin/stdout exposing the notification
//! tools. Each request is handled on its own task; one writer task owns
//! stdout so responses never interleave.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::ports::{AudioDeviceControl, SoundRenderer, SoundValidator};
use crate::application::NotificationService;
use crate::domain::config::AppConfig;
use crate::domain::{PlaybackRequest, SoundSource, Volume};

use super::app::{build_service, EXIT_ERROR, EXIT_SUCCESS};
use super::presenter::Presenter;

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "notify-chime";

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

impl RpcResponse {
    fn reply(id: Value, outcome: Result<Value, RpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: "2.0",
            id,
            result,
            error,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct PlayArgs {
    #[serde(default)]
    source: Option<SoundSource>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    device: Option<String>,
    #[serde(default)]
    volume: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct TestArgs {
    #[serde(default)]
    use_custom: Option<bool>,
}

/// Dispatches JSON-RPC messages to the notification service
pub struct ToolServer<R, D, V>
where
    R: SoundRenderer,
    D: AudioDeviceControl,
    V: SoundValidator,
{
    service: NotificationService<R, D, V>,
}

impl<R, D, V> ToolServer<R, D, V>
where
    R: SoundRenderer + 'static,
    D: AudioDeviceControl + 'static,
    V: SoundValidator + 'static,
{
    pub fn new(service: NotificationService<R, D, V>) -> Self {
        Self { service }
    }

    /// Handle one input line, returning the serialized response if any.
    ///
    /// Notifications (messages without an id) get no response.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Err(e) => RpcResponse::reply(
                Value::Null,
                Err(RpcError::new(PARSE_ERROR, format!("Parse error: {}", e))),
            ),
            Ok(value) => {
                let id_hint = value.get("id").cloned().unwrap_or(Value::Null);
                match serde_json::from_value::<RpcRequest>(value) {
                    Err(e) => RpcResponse::reply(
                        id_hint,
                        Err(RpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e))),
                    ),
                    Ok(request) => {
                        let Some(id) = request.id.clone() else {
                            debug!(method = %request.method, "notification received");
                            return None;
                        };
                        RpcResponse::reply(id, self.dispatch(&request.method, request.params).await)
                    }
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "failed to encode response");
                None
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        debug!(method, "request");
        match method {
            "initialize" => Ok(initialize_result(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => {
                let call: ToolCall = serde_json::from_value(params)
                    .map_err(|e| RpcError::invalid_params(e.to_string()))?;
                self.call_tool(&call.name, call.arguments.unwrap_or(Value::Null))
                    .await
            }
            other => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        }
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, RpcError> {
        match name {
            "play_notification_sound" => {
                let args: PlayArgs = parse_args(arguments)?;
                let request = play_request(args)?;
                let outcome = self.service.play(&request).await;
                tool_result(outcome.summary(), &outcome, !outcome.success)
            }
            "get_audio_status" => {
                let status = self.service.status().await;
                let text = match &status.last_outcome {
                    Some(outcome) => format!(
                        "Renderer: {}; device control: {}; current device: {}; last: {}",
                        status.renderer,
                        status.device_control,
                        status.current_device.as_deref().unwrap_or("unknown"),
                        outcome.summary()
                    ),
                    None => format!(
                        "Renderer: {}; device control: {}; current device: {}; no notifications yet",
                        status.renderer,
                        status.device_control,
                        status.current_device.as_deref().unwrap_or("unknown"),
                    ),
                };
                tool_result(text, &status, false)
            }
            "test_audio_playback" => {
                let args: TestArgs = parse_args(arguments)?;
                let outcome = self
                    .service
                    .test_playback(args.use_custom.unwrap_or(false))
                    .await;
                tool_result(outcome.summary(), &outcome, !outcome.success)
            }
            "list_audio_devices" => {
                let listing = self.service.devices().await;
                let mut text = if listing.devices.is_empty() {
                    "No output devices reported".to_string()
                } else {
                    format!("Output devices: {}", listing.devices.join(", "))
                };
                if let Some(current) = &listing.current {
                    text.push_str(&format!("; current: {}", current));
                }
                if let Some(warning) = &listing.warning {
                    text.push_str(&format!("; {}", warning));
                }
                tool_result(text, &listing, false)
            }
            other => Err(RpcError::invalid_params(format!("Unknown tool: {}", other))),
        }
    }
}

fn parse_args<T: for<'de> Deserialize<'de> + Default>(arguments: Value) -> Result<T, RpcError> {
    if arguments.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(arguments).map_err(|e| RpcError::invalid_params(e.to_string()))
}

fn play_request(args: PlayArgs) -> Result<PlaybackRequest, RpcError> {
    let mut request = PlaybackRequest::new(args.source.unwrap_or_default());
    if let Some(message) = args.message {
        request = request.with_message(message);
    }
    if let Some(device) = args.device {
        request = request.with_device(device);
    }
    if let Some(level) = args.volume {
        let volume = Volume::new(level).map_err(|e| RpcError::invalid_params(e.to_string()))?;
        request = request.with_volume(volume);
    }
    Ok(request)
}

fn tool_result<T: Serialize>(text: String, structured: &T, is_error: bool) -> Result<Value, RpcError> {
    let structured = serde_json::to_value(structured)
        .map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))?;
    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": structured,
        "isError": is_error,
    }))
}

fn initialize_result(params: &Value) -> Value {
    let version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION);
    json!({
        "protocolVersion": version,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

fn tool_definitions() -> Value {
    json!([
        {
            "name": "play_notification_sound",
            "description": "Play a notification sound, optionally on a specific output device",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "source": {
                        "type": "string",
                        "enum": ["default", "custom", "auto"],
                        "description": "Which sound to play (default: auto)"
                    },
                    "message": {
                        "type": "string",
                        "description": "Message logged with the notification"
                    },
                    "device": {
                        "type": "string",
                        "description": "Output device to play on; restored afterwards"
                    },
                    "volume": {
                        "type": "number",
                        "minimum": 0.0,
                        "maximum": 1.0,
                        "description": "Playback volume override"
                    }
                }
            }
        },
        {
            "name": "get_audio_status",
            "description": "Report configuration, devices and the last playback outcome",
            "inputSchema": { "type": "object", "properties": {} }
        },
        {
            "name": "test_audio_playback",
            "description": "Play the default sound, or the custom sound when use_custom is true",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "use_custom": { "type": "boolean", "default": false }
                }
            }
        },
        {
            "name": "list_audio_devices",
            "description": "List output devices and the active one",
            "inputSchema": { "type": "object", "properties": {} }
        }
    ])
}

/// Serve requests from `input` until EOF, writing responses to `output`
pub async fn serve<R, D, V, I, O>(
    server: Arc<ToolServer<R, D, V>>,
    input: I,
    mut output: O,
) -> io::Result<()>
where
    R: SoundRenderer + 'static,
    D: AudioDeviceControl + 'static,
    V: SoundValidator + 'static,
    I: AsyncRead + Unpin,
    O: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<String>(64);

    let writer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        Ok::<(), io::Error>(())
    });

    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let server = Arc::clone(&server);
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(response) = server.handle_line(&line).await {
                let _ = tx.send(response).await;
            }
        });
    }

    // In-flight handlers hold their own senders
    drop(tx);
    writer
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
}

/// Run the stdio server until EOF or Ctrl-C
pub async fn run_serve(cli_config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let service = match build_service(cli_config).await {
        Ok(service) => service,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(e.exit_code());
        }
    };

    let server = Arc::new(ToolServer::new(service));
    info!("serving notification tools on stdio");

    tokio::select! {
        result = serve(server, tokio::io::stdin(), tokio::io::stdout()) => match result {
            Ok(()) => {
                info!("stdin closed, shutting down");
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                presenter.error(&format!("Server I/O error: {}", e));
                ExitCode::from(EXIT_ERROR)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, shutting down");
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}
