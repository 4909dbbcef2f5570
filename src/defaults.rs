//! Built-in configuration and the template bodies written by `init`.
//!
//! The bodies are NestJS boilerplate. The generator treats them as opaque
//! text and only substitutes placeholders.

use indexmap::IndexMap;
use log::warn;
use std::path::PathBuf;

use crate::config::{TemplateDescriptor, TemplateSet};
use crate::error::ScaffoldError;
use crate::exclusion::ExclusionTable;
use crate::generator::{write_if_absent, WriteResult};

/// Module names processed by the `batch` command.
pub const BATCH_MODULES: [&str; 4] = ["auth", "users", "products", "orders"];

pub fn template_set() -> TemplateSet {
    let mut templates = IndexMap::new();
    templates.insert("module".to_string(), TemplateDescriptor::new("module.ts"));
    templates.insert(
        "controller".to_string(),
        TemplateDescriptor::new("controller.ts"),
    );
    templates.insert("service".to_string(), TemplateDescriptor::new("service.ts"));
    templates.insert(
        "create-dto".to_string(),
        TemplateDescriptor::new("dto.ts")
            .with_subdir("dto")
            .with_filename_pattern("create-{{moduleName}}.dto.ts"),
    );
    templates.insert(
        "update-dto".to_string(),
        TemplateDescriptor::new("dto.ts")
            .with_subdir("dto")
            .with_filename_pattern("update-{{moduleName}}.dto.ts"),
    );
    templates.insert(
        "schema".to_string(),
        TemplateDescriptor::new("schema.ts")
            .with_subdir("schemas")
            .optional(),
    );

    TemplateSet {
        templates_dir: PathBuf::from("templates"),
        output_dir: PathBuf::from("src"),
        templates,
        exclusions: ExclusionTable::new()
            .exclude("create-dto", ["auth"])
            .exclude("update-dto", ["auth"])
            .exclude("schema", ["auth"]),
    }
}

/// The built-in body for `template_id`, if there is one.
pub fn template_body(template_id: &str) -> Option<&'static str> {
    match template_id {
        "module" => Some(MODULE),
        "controller" => Some(CONTROLLER),
        "service" => Some(SERVICE),
        "create-dto" => Some(CREATE_DTO),
        "update-dto" => Some(UPDATE_DTO),
        "schema" => Some(SCHEMA),
        _ => None,
    }
}

/// Writes the built-in body of every template in `template_set` into its
/// template store, keeping bodies that are already there. Templates without
/// a built-in body are skipped with a warning.
pub fn bootstrap_store(
    template_set: &TemplateSet,
) -> Result<Vec<(PathBuf, WriteResult)>, ScaffoldError> {
    let mut written = Vec::new();
    for template_id in template_set.templates.keys() {
        let Some(body) = template_body(template_id) else {
            warn!("No built-in template for '{}', add it by hand", template_id);
            continue;
        };
        let path = template_set.template_path(template_id);
        let result = write_if_absent(&path, body)?;
        written.push((path, result));
    }
    Ok(written)
}

const MODULE: &str = r#"import { Module } from '@nestjs/common';
import { {{ModuleName}}Controller } from './{{moduleName}}.controller';
import { {{ModuleName}}Service } from './{{moduleName}}.service';

@Module({
  controllers: [{{ModuleName}}Controller],
  providers: [{{ModuleName}}Service],
  exports: [{{ModuleName}}Service],
})
export class {{ModuleName}}Module {}
"#;

const CONTROLLER: &str = r#"import { Body, Controller, Delete, Get, Param, Patch, Post } from '@nestjs/common';
import { {{ModuleName}}Service } from './{{moduleName}}.service';

@Controller('{{module-name}}')
export class {{ModuleName}}Controller {
  constructor(private readonly {{moduleNameCamel}}Service: {{ModuleName}}Service) {}

  @Post()
  create(@Body() body: unknown) {
    return this.{{moduleNameCamel}}Service.create(body);
  }

  @Get()
  findAll() {
    return this.{{moduleNameCamel}}Service.findAll();
  }

  @Get(':id')
  findOne(@Param('id') id: string) {
    return this.{{moduleNameCamel}}Service.findOne(id);
  }

  @Patch(':id')
  update(@Param('id') id: string, @Body() body: unknown) {
    return this.{{moduleNameCamel}}Service.update(id, body);
  }

  @Delete(':id')
  remove(@Param('id') id: string) {
    return this.{{moduleNameCamel}}Service.remove(id);
  }
}
"#;

const SERVICE: &str = r#"import { Injectable, Logger } from '@nestjs/common';

@Injectable()
export class {{ModuleName}}Service {
  private readonly logger = new Logger({{ModuleName}}Service.name);

  create(data: unknown) {
    this.logger.log('create {{module_name}}');
    return data;
  }

  findAll() {
    return [];
  }

  findOne(id: string) {
    return { id };
  }

  update(id: string, data: unknown) {
    return { id, ...(data as object) };
  }

  remove(id: string) {
    return { id, deleted: true };
  }
}
"#;

const CREATE_DTO: &str = r#"export class Create{{ModuleName}}Dto {
  readonly name: string;
}
"#;

const UPDATE_DTO: &str = r#"import { PartialType } from '@nestjs/mapped-types';
import { Create{{ModuleName}}Dto } from './create-{{moduleName}}.dto';

export class Update{{ModuleName}}Dto extends PartialType(Create{{ModuleName}}Dto) {}
"#;

const SCHEMA: &str = r#"import { Prop, Schema, SchemaFactory } from '@nestjs/mongoose';
import { HydratedDocument } from 'mongoose';

export const {{MODULE_NAME}}_COLLECTION = '{{module_name}}';

export type {{ModuleName}}Document = HydratedDocument<{{ModuleName}}>;

@Schema({ collection: {{MODULE_NAME}}_COLLECTION, timestamps: true })
export class {{ModuleName}} {
  @Prop({ required: true })
  name: string;
}

export const {{ModuleName}}Schema = SchemaFactory.createForClass({{ModuleName}});
"#;
