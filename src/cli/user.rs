//
//  teamcity-cli
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # User Commands
//!
//! ```bash
//! tc user list
//! tc user view alice
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::resources::{Group, Role, User};
use crate::fields::{UserField, UsersField};
use crate::output::{
    format_bool, print_field, print_header, print_optional_field, TableBuilder, TableOutput,
    TableRow,
};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    #[command(visible_alias = "ls")]
    List,

    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    pub username: String,
}

impl TableRow for User {
    fn headers() -> &'static [&'static str] {
        &["USERNAME", "NAME", "EMAIL", "LAST LOGIN"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.username.clone(),
            self.name.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            self.last_login.clone().unwrap_or_default(),
        ]
    }
}

impl TableRow for Role {
    fn headers() -> &'static [&'static str] {
        &["ROLE", "SCOPE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![self.role_id.clone(), self.scope.clone().unwrap_or_default()]
    }
}

impl TableRow for Group {
    fn headers() -> &'static [&'static str] {
        &["KEY", "NAME", "DESCRIPTION"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.key.clone(),
            self.name.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Serialize)]
struct UserDetail {
    #[serde(flatten)]
    user: User,
    administrator: bool,
    #[serde(rename = "roleList")]
    role_list: Vec<Role>,
    #[serde(rename = "groupList")]
    group_list: Vec<Group>,
}

impl TableOutput for UserDetail {
    fn print_table(&self, color: bool) {
        let user = &self.user;
        print_header(user.name.as_deref().unwrap_or(&user.username));
        print_field("Username", &user.username, color);
        print_optional_field("Email", user.email.as_deref(), color);
        print_optional_field("Last login", user.last_login.as_deref(), color);
        print_field("Administrator", &format_bool(self.administrator, color), color);

        if !self.role_list.is_empty() {
            println!();
            println!("Roles:");
            TableBuilder::new()
                .color(color)
                .headers(Role::headers().iter().copied())
                .rows(self.role_list.iter().map(|r| r.row(color)))
                .print();
        }
        if !self.group_list.is_empty() {
            println!();
            println!("Groups:");
            TableBuilder::new()
                .color(color)
                .headers(Group::headers().iter().copied())
                .rows(self.group_list.iter().map(|g| g.row(color)))
                .print();
        }
    }
}

impl UserCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            UserSubcommand::List => self.list(global),
            UserSubcommand::View(args) => self.view(args, global),
        }
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let fields = UsersField::with_fields().count().user(
            UserField::with_fields()
                .username()
                .name()
                .email()
                .last_login(),
        );
        let users = client.users().with_fields(fields).all()?;
        global.output().write_list(&users)
    }

    fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let users = client.users();

        let detail = UserDetail {
            user: users.details(&args.username)?,
            administrator: users.is_administrator(&args.username)?,
            role_list: users.roles(&args.username)?,
            group_list: users.groups(&args.username)?,
        };
        global.output().write(&detail)
    }
}
