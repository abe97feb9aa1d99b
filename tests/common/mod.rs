//! Shared test utilities

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Cached binary path for the mockspec CLI to avoid repeated lookups
#[allow(deprecated)]
pub static MOCKSPEC_BIN: std::sync::LazyLock<PathBuf> =
    std::sync::LazyLock::new(|| assert_cmd::cargo::cargo_bin("mockspec"));

/// Test helper to create a command with the cached binary, isolated from
/// the caller's settings and logging environment.
pub fn mockspec_cmd(config_dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(&*MOCKSPEC_BIN);
    cmd.env("MOCKSPEC_CONFIG", config_dir.join("config.toml"))
        .env_remove("MOCKSPEC_SPECIFICATION_URL")
        .env_remove("MOCKSPEC_USE_EXAMPLES")
        .env_remove("MOCKSPEC_LOG")
        .env_remove("MOCKSPEC_LOG_FORMAT")
        .env_remove("MOCKSPEC_LOG_FILE");
    cmd
}

pub const PETSTORE_YAML: &str = r##"
openapi: 3.0.0
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      responses:
        200:
          description: A list of pets
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: "#/components/schemas/Pet"
        default:
          $ref: "#/components/responses/Error"
  /pets/{petId}:
    parameters:
      - name: petId
        in: path
        schema:
          type: integer
    get:
      responses:
        200:
          description: One pet
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pet"
        404:
          description: Not found
components:
  schemas:
    Pet:
      type: object
      required: [id, name]
      properties:
        id:
          type: integer
          format: int64
        name:
          type: string
  responses:
    Error:
      description: Unexpected error
"##;
