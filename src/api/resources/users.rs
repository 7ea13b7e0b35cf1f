//
//  teamcity-cli
//  api/resources/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Users and Groups
//!
//! Users are addressed by username (`users/username:alice`), groups by key
//! (`userGroups/key:ALL_USERS_GROUP`).
//!
//! ## Notes
//!
//! - [`UsersApi::create`] posts the user and then sets the password in a
//!   second request, since not every server version accepts a password in
//!   the creation payload.
//! - [`UsersApi::is_administrator`] checks the global `SYSTEM_ADMIN` role; a
//!   404 from the server means the role is not assigned.

use serde::{Deserialize, Serialize};

use super::common::{xml_escape, Properties};
use crate::api::client::TeamCityClient;
use crate::api::common::{ApiError, ApiResult, RequestBody};
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;
use crate::locators::UserLocator;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "@id")]
    pub id: Option<u64>,
    #[serde(alias = "@username")]
    pub username: String,
    #[serde(alias = "@name")]
    pub name: Option<String>,
    #[serde(alias = "@email")]
    pub email: Option<String>,
    #[serde(alias = "@lastLogin")]
    pub last_login: Option<String>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    pub roles: Option<Roles>,
    pub groups: Option<Groups>,
    pub properties: Option<Properties>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Users {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    pub user: Vec<User>,
}

impl Collection for Users {
    type Item = User;

    fn into_items(self) -> Vec<User> {
        self.user
    }
}

/// A role assignment, e.g. `PROJECT_ADMIN` scoped to `p:MyProject`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Role {
    #[serde(alias = "@roleId")]
    pub role_id: String,
    #[serde(alias = "@scope")]
    pub scope: Option<String>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roles {
    pub role: Vec<Role>,
}

impl Collection for Roles {
    type Item = Role;

    fn into_items(self) -> Vec<Role> {
        self.role
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Group {
    #[serde(alias = "@key")]
    pub key: String,
    #[serde(alias = "@name")]
    pub name: Option<String>,
    #[serde(alias = "@description")]
    pub description: Option<String>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    pub users: Option<Users>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Groups {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    pub group: Vec<Group>,
}

impl Collection for Groups {
    type Item = Group;

    fn into_items(self) -> Vec<Group> {
        self.group
    }
}

/// A new user account.
#[derive(Debug, Clone, Default)]
pub struct NewUser<'u> {
    pub username: &'u str,
    pub name: &'u str,
    pub email: &'u str,
    pub password: &'u str,
}

/// Accessor for `users` and `userGroups`.
#[derive(Debug, Clone)]
pub struct UsersApi<'a> {
    resource: Resource<'a>,
    groups: Resource<'a>,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "users"),
            groups: Resource::new(client, "userGroups"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        let fields = fields.into();
        Self {
            resource: self.resource.with_fields(fields.clone()),
            groups: self.groups.with_fields(fields),
        }
    }

    fn user(&self, username: &str) -> ApiResult<Resource<'a>> {
        self.resource.at_locator(&UserLocator::with_username(username))
    }

    pub fn all(&self) -> ApiResult<Vec<User>> {
        self.resource.list::<Users>("")
    }

    pub fn details(&self, username: &str) -> ApiResult<User> {
        self.user(username)?.fetch("")
    }

    pub fn roles(&self, username: &str) -> ApiResult<Vec<Role>> {
        self.user(username)?.list::<Roles>("roles")
    }

    pub fn groups(&self, username: &str) -> ApiResult<Vec<Group>> {
        self.user(username)?.list::<Groups>("groups")
    }

    pub fn all_groups(&self) -> ApiResult<Vec<Group>> {
        self.groups.list::<Groups>("")
    }

    pub fn users_in_group(&self, group_key: &str) -> ApiResult<Vec<User>> {
        let group: Group = self.groups.at(format!("key:{group_key}")).fetch("")?;
        Ok(group.users.map(Users::into_items).unwrap_or_default())
    }

    /// Creates a user and sets its password.
    pub fn create(&self, user: &NewUser<'_>) -> ApiResult<User> {
        let body = format!(
            r#"<user name="{}" username="{}" email="{}" password="{}"/>"#,
            xml_escape(user.name),
            xml_escape(user.username),
            xml_escape(user.email),
            xml_escape(user.password)
        );
        let response = self.resource.post("", RequestBody::xml(body))?;
        let created: User = response.decode(self.resource.format())?;
        self.add_password(user.username, user.password)?;
        Ok(created)
    }

    pub fn add_password(&self, username: &str, password: &str) -> ApiResult<()> {
        self.user(username)?
            .put("password", RequestBody::text(password))?;
        Ok(())
    }

    pub fn delete(&self, username: &str) -> ApiResult<()> {
        self.user(username)?.delete("")?;
        Ok(())
    }

    /// Whether the user holds the global system administrator role.
    pub fn is_administrator(&self, username: &str) -> ApiResult<bool> {
        match self.user(username)?.fetch::<Role>("roles/SYSTEM_ADMIN/g") {
            Ok(_) => Ok(true),
            Err(ApiError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_with_roles_from_xml() {
        let xml = r#"<user username="alice" name="Alice" id="1">
            <roles><role roleId="SYSTEM_ADMIN" scope="g"/><role roleId="PROJECT_VIEWER" scope="p:P1"/></roles>
        </user>"#;
        let user: User = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(user.username, "alice");
        let roles = user.roles.unwrap().into_items();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[1].scope.as_deref(), Some("p:P1"));
    }

    #[test]
    fn test_group_members_from_json() {
        let json = r#"{"key":"DEVS","name":"Developers","users":{"count":1,"user":[{"username":"bob"}]}}"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.users.unwrap().into_items()[0].username, "bob");
    }
}
