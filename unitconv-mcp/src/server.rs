//! Request dispatch and tool implementations

use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};
use unitconv_core::{format_significant, format_unit, UnitconvError};
use unitconv_units::{self as units, Category, ConversionQuery, Unit, ENGINE};

use crate::config::Config;
use crate::protocol::{McpError, McpRequest, McpResponse};
use crate::session::Session;

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "unitconv";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Server {
    config: Config,
    session: Session,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let session = Session::new(config.history_limit);
        Server { config, session }
    }

    /// Handle one input line. Returns the serialized response, or `None` for notifications.
    pub fn process_line(&mut self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => {
                debug!(method = %request.method, "processing");
                let response = self.handle_request(&request);
                // Notifications (no id) must not receive a response
                if request.id.is_none() {
                    debug!(method = %request.method, "notification processed");
                    return None;
                }
                response
            }
            Err(e) => {
                warn!(error = %e, "unparseable request");
                McpResponse::new(None, Err(McpError::parse_error(e)))
            }
        };

        match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(e) => {
                error!(error = %e, "failed to serialize response");
                let err = UnitconvError::internal(format!("could not serialize response: {}", e));
                serde_json::to_string(&McpResponse::new(response.id, Err(err.into()))).ok()
            }
        }
    }

    pub fn handle_request(&mut self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => Ok(handle_initialize(&request.params)),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => Ok(tools_list()),
            "tools/call" => self.handle_tool_call(&request.params),

            _ => Err(McpError::method_not_found(&request.method)),
        };

        McpResponse::new(request.id.clone(), result)
    }

    fn handle_tool_call(&mut self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params
            .as_ref()
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;
        let name = params
            .get("name")
            .and_then(|n| n.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;
        let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        info!(tool = name, "tool call");

        match name {
            "list_categories" => Ok(self.tool_list_categories()),
            "list_units" => self.tool_list_units(&args),
            "convert" => self.tool_convert(&args),
            "convert_text" => self.tool_convert_text(&args),
            "search_units" => self.tool_search_units(&args),
            "formula" => self.tool_formula(&args),
            "history" => Ok(self.tool_history()),
            "toggle_favorite" => self.tool_toggle_favorite(&args),
            "favorites" => Ok(self.tool_favorites()),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    fn display(&self, value: f64) -> String {
        format_significant(value, self.config.sigfigs)
    }

    fn tool_list_categories(&self) -> JsonValue {
        let categories: Vec<JsonValue> = units::list_categories()
            .iter()
            .map(|c| {
                json!({
                    "key": c.key(),
                    "name": c.name(),
                    "base_unit": c.base_unit().key,
                })
            })
            .collect();
        let names: Vec<&str> = units::list_categories().iter().map(|c| c.name()).collect();

        json!({
            "content": [{ "type": "text", "text": names.join(", ") }],
            "data": categories
        })
    }

    fn tool_list_units(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = text_arg(args, "list_units", "category")?;
        let listed = match units::list_units(category) {
            Ok(listed) => listed,
            Err(e) => return Ok(tool_error(e.into())),
        };

        let text = listed
            .iter()
            .map(|u| format!("{} ({})", u.label(), u.symbol))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "data": listed.iter().map(unit_json).collect::<Vec<_>>()
        }))
    }

    fn tool_convert(&mut self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = text_arg(args, "convert", "category")?;
        let from_unit = text_arg(args, "convert", "from_unit")?;
        let to_unit = text_arg(args, "convert", "to_unit")?;
        let value = number_arg(args, "convert", "value")?;

        let resolved = category
            .parse::<Category>()
            .and_then(|c| Ok((ENGINE.resolve(c, from_unit)?, ENGINE.resolve(c, to_unit)?)));
        let (from, to) = match resolved {
            Ok(pair) => pair,
            Err(e) => return Ok(tool_error(e.into())),
        };

        Ok(self.run_conversion(from, to, value))
    }

    fn tool_convert_text(&mut self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let query = text_arg(args, "convert_text", "query")?;
        match units::parse_query(query) {
            Ok(ConversionQuery { value, from, to, .. }) => Ok(self.run_conversion(from, to, value)),
            Err(e) => Ok(tool_error(e.into())),
        }
    }

    fn run_conversion(&mut self, from: &'static Unit, to: &'static Unit, value: f64) -> JsonValue {
        match ENGINE.convert_units(from, to, value) {
            Ok(result) => {
                self.session.record(from, to, value, result);
                let text = format!(
                    "{} {} = {} {}",
                    self.display(value),
                    from.label(),
                    self.display(result),
                    to.label()
                );
                json!({
                    "content": [{ "type": "text", "text": text }],
                    "data": {
                        "category": from.category,
                        "from_unit": from.key,
                        "to_unit": to.key,
                        "value": value,
                        "result": result,
                        "formatted": self.display(result),
                    },
                    "isError": false
                })
            }
            Err(e) => tool_error(e.into()),
        }
    }

    fn tool_search_units(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let query = text_arg(args, "search_units", "query")?;
        let hits = units::search(query);

        let text = if hits.is_empty() {
            format!("No units found matching '{}'", query)
        } else {
            hits.iter()
                .map(|hit| {
                    let symbols: Vec<&str> = hit.units.iter().map(|u| u.symbol).collect();
                    format!("{}: {}", hit.category, symbols.join(", "))
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        let data: Vec<JsonValue> = hits
            .iter()
            .map(|hit| {
                json!({
                    "category": hit.category,
                    "units": hit.units.iter().map(unit_json).collect::<Vec<_>>(),
                })
            })
            .collect();

        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "data": data
        }))
    }

    fn tool_formula(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = text_arg(args, "formula", "category")?;
        let from_unit = text_arg(args, "formula", "from_unit")?;
        let to_unit = text_arg(args, "formula", "to_unit")?;

        let described = category.parse::<Category>().and_then(|c| {
            let from = ENGINE.resolve(c, from_unit)?;
            let to = ENGINE.resolve(c, to_unit)?;
            units::formula(from, to)
        });

        match described {
            Ok(text) => Ok(json!({
                "content": [{ "type": "text", "text": format!("Formula: {}", text) }],
                "isError": false
            })),
            Err(e) => Ok(tool_error(e.into())),
        }
    }

    fn tool_history(&self) -> JsonValue {
        let entries: Vec<_> = self.session.history().collect();
        let text = if entries.is_empty() {
            "No conversions yet".to_string()
        } else {
            entries
                .iter()
                .map(|e| {
                    format!(
                        "{} {} → {} {} ({})",
                        self.display(e.value),
                        format_unit(e.from_unit),
                        self.display(e.result),
                        format_unit(e.to_unit),
                        e.timestamp.format("%Y-%m-%d %H:%M:%S")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        json!({
            "content": [{ "type": "text", "text": text }],
            "data": entries
        })
    }

    fn tool_toggle_favorite(&mut self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = text_arg(args, "toggle_favorite", "category")?;
        let from_unit = text_arg(args, "toggle_favorite", "from_unit")?;
        let to_unit = text_arg(args, "toggle_favorite", "to_unit")?;

        let resolved = category
            .parse::<Category>()
            .and_then(|c| Ok((ENGINE.resolve(c, from_unit)?, ENGINE.resolve(c, to_unit)?)));
        let (from, to) = match resolved {
            Ok(pair) => pair,
            Err(e) => return Ok(tool_error(e.into())),
        };

        let added = self.session.toggle_favorite(from, to);
        let text = format!(
            "{} {} → {} {} favorites",
            if added { "Added" } else { "Removed" },
            from.label(),
            to.label(),
            if added { "to" } else { "from" }
        );
        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "data": { "favorite": added },
            "isError": false
        }))
    }

    fn tool_favorites(&self) -> JsonValue {
        let favorites: Vec<_> = self.session.favorites().collect();
        let text = if favorites.is_empty() {
            "No favorites yet".to_string()
        } else {
            favorites
                .iter()
                .map(|f| {
                    format!(
                        "{} → {}",
                        format_unit(f.from_unit),
                        format_unit(f.to_unit)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        json!({
            "content": [{ "type": "text", "text": text }],
            "data": favorites
        })
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> JsonValue {
    let client_info = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit conversion across length, mass, temperature and more"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Use list_categories and list_units to discover units, then convert. convert_text accepts queries like \"5 km to mi\"."
    })
}

fn tools_list() -> JsonValue {
    let pair_schema = json!({
        "type": "object",
        "properties": {
            "category": { "type": "string", "description": "Category name, e.g. \"Length\"" },
            "from_unit": { "type": "string", "description": "Source unit key, symbol or alias" },
            "to_unit": { "type": "string", "description": "Target unit key, symbol or alias" }
        },
        "required": ["category", "from_unit", "to_unit"]
    });

    json!({
        "tools": [
            {
                "name": "list_categories",
                "description": "List the supported measurement categories in display order.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "list_units",
                "description": "List the units of a category, base unit first.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "description": "Category name, e.g. \"Temperature\"" }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "convert",
                "description": "Convert a value between two units of the same category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "description": "Category name, e.g. \"Length\"" },
                        "from_unit": { "type": "string", "description": "Source unit key, symbol or alias" },
                        "to_unit": { "type": "string", "description": "Target unit key, symbol or alias" },
                        "value": {
                            "type": ["number", "string"],
                            "description": "Value to convert"
                        }
                    },
                    "required": ["category", "from_unit", "to_unit", "value"]
                }
            },
            {
                "name": "convert_text",
                "description": "Convert a free-form query such as \"5 km to mi\" or \"100 F in C\".",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Conversion query" }
                    },
                    "required": ["query"]
                }
            },
            {
                "name": "search_units",
                "description": "Find categories by name or by the units they contain.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Search text" }
                    },
                    "required": ["query"]
                }
            },
            {
                "name": "formula",
                "description": "Show the formula that converts one unit into another.",
                "inputSchema": pair_schema
            },
            {
                "name": "history",
                "description": "Recent conversions in this session, newest first.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "toggle_favorite",
                "description": "Add a unit pair to favorites, or remove it if already there.",
                "inputSchema": pair_schema
            },
            {
                "name": "favorites",
                "description": "List favorite unit pairs.",
                "inputSchema": { "type": "object", "properties": {} }
            }
        ]
    })
}

fn unit_json(unit: &Unit) -> JsonValue {
    json!({
        "key": unit.key,
        "symbol": unit.symbol,
        "label": unit.label(),
        "is_base": unit.is_base(),
    })
}

/// A tool result that reports a failed conversion to the user
fn tool_error(err: UnitconvError) -> JsonValue {
    let text = match &err.suggestion {
        Some(suggestion) => format!("{}\n{}", err.message, suggestion),
        None => err.message.clone(),
    };
    json!({
        "content": [{ "type": "text", "text": text }],
        "data": err,
        "isError": true
    })
}

fn text_arg<'a>(args: &'a JsonValue, tool: &str, name: &str) -> Result<&'a str, McpError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| UnitconvError::arg_type(tool, name, "a string").into())
}

/// Numbers may arrive as JSON numbers or numeric strings ("NaN" and "inf" included)
fn number_arg(args: &JsonValue, tool: &str, name: &str) -> Result<f64, McpError> {
    let parsed = match args.get(name) {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| UnitconvError::arg_type(tool, name, "a number").into())
}
