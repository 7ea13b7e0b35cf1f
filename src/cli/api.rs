//
//  teamcity-cli
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Raw API Requests
//!
//! Sends a request to any REST path under `app/rest` with the configured
//! server, credential and API version, and prints the response body.
//!
//! ```bash
//! # GET, printed as pretty JSON
//! tc api server
//! tc api "builds?locator=running:true"
//!
//! # Plain-text resources
//! tc api buildTypes/id:Bt1/paused --text
//!
//! # Writes
//! tc api buildTypes/id:Bt1/paused -X PUT -d true --text
//! tc api builds/id:42/tags -X POST --xml -d '<tags><tag name="rc"/></tags>'
//! ```

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::api::{ContentType, RequestBody, ResourcePath};
use crate::fields::Fields;
use crate::output::pretty_json_text;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Path below `app/rest`, e.g. `projects/id:_Root`
    pub endpoint: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Query parameter as `name=value`
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Request body, or `@file` to read it from a file
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Send the body as XML instead of JSON
    #[arg(long, conflicts_with = "text")]
    pub xml: bool,

    /// Use text/plain for the body and the response
    #[arg(long)]
    pub text: bool,
}

impl ApiCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let path = self.resource_path()?;
        let accept = if self.text {
            ContentType::Text
        } else {
            ContentType::Json
        };

        let body = match self.method.to_uppercase().as_str() {
            "GET" => {
                if self.data.is_some() {
                    bail!("GET requests take no body");
                }
                if self.text {
                    client.get_text(path)?
                } else {
                    let value: serde_json::Value = client.get(path, &Fields::new(), accept)?;
                    serde_json::to_string_pretty(&value)?
                }
            }
            "POST" => client.post(path, self.request_body()?, accept)?.text(),
            "PUT" => client.put(path, self.request_body()?, accept)?.text(),
            "DELETE" => client.delete(path)?.text(),
            other => bail!("Unsupported HTTP method: {other}"),
        };

        if !body.is_empty() {
            println!("{}", pretty_json_text(&body));
        }
        Ok(())
    }

    fn resource_path(&self) -> Result<ResourcePath> {
        let endpoint = self.endpoint.trim_start_matches('/');
        let endpoint = endpoint.strip_prefix("app/rest/").unwrap_or(endpoint);
        let (path, inline_query) = match endpoint.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (endpoint, None),
        };

        let mut resource = ResourcePath::parse(path);
        if let Some(query) = inline_query {
            for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
                resource = resource.query(name.into_owned(), value.into_owned());
            }
        }
        for pair in &self.query {
            let (name, value) = pair
                .split_once('=')
                .with_context(|| format!("Invalid query '{pair}'. Expected name=value"))?;
            resource = resource.query(name, value);
        }
        Ok(resource)
    }

    fn request_body(&self) -> Result<RequestBody> {
        let data = match self.data.as_deref() {
            Some(data) => match data.strip_prefix('@') {
                Some(file) => std::fs::read_to_string(file)
                    .with_context(|| format!("Failed to read {file}"))?,
                None => data.to_string(),
            },
            None => String::new(),
        };

        if self.text {
            Ok(RequestBody::text(data))
        } else if self.xml {
            Ok(RequestBody::xml(data))
        } else if data.is_empty() {
            Ok(RequestBody::json(&serde_json::Value::Null)?)
        } else {
            let value: serde_json::Value =
                serde_json::from_str(&data).context("Request body is not valid JSON")?;
            Ok(RequestBody::json(&value)?)
        }
    }
}
