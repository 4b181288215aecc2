//! Go multi-module workspace: Hertz + GORM on Postgres, optional Redis, Docker.

use super::{ProjectGenerator, StepPlan};
use crate::domain::{Language, ProjectConfig};

const BASE_DIRS: &[&str] = &[
    "bom",
    "share/errors",
    "share/utils",
    "share/types",
    "share/middleware",
    "share/repository/gorm",
];

const EXAMPLE_DIRS: &[&str] = &[
    "user/domain/entity",
    "user/domain/repository",
    "user/domain/service",
    "user/domain/valueobject",
    "user/domain/event",
    "user/domain/enum",
    "user/domain/errors",
    "user/infrastructure/entity",
    "user/infrastructure/converter",
    "user/infrastructure/repository",
    "api/user-api/dto",
    "api/user-api/service",
    "api/user-api/http",
];

const CMD_DIRS: &[&str] = &["cmd/api"];

#[derive(Debug, Default, Clone, Copy)]
pub struct GoStack;

impl ProjectGenerator for GoStack {
    fn language(&self) -> Language {
        Language::Go
    }

    fn modules(&self, config: &ProjectConfig) -> Vec<&'static str> {
        if config.features().example_module {
            vec!["bom", "share", "user", "api", "cmd"]
        } else {
            vec!["bom", "share", "cmd"]
        }
    }

    fn plan(&self, config: &ProjectConfig) -> Vec<StepPlan> {
        let features = config.features();

        let mut dirs = BASE_DIRS.to_vec();
        if features.example_module {
            dirs.extend_from_slice(EXAMPLE_DIRS);
        }
        dirs.extend_from_slice(CMD_DIRS);

        let mut plan = vec![
            StepPlan::new("Create project directories").dirs(dirs),
            StepPlan::new("Generate go.work").render("go.work"),
            StepPlan::new("Generate .gitignore").verbatim(".gitignore"),
            StepPlan::new("Generate Makefile").render("Makefile"),
            StepPlan::new("Generate bom module")
                .render("bom/go.mod")
                .render("bom/bom.go"),
            StepPlan::new("Generate share module")
                .render("share/go.mod")
                .verbatim("share/errors/app_error.go")
                .render("share/errors/error_handler.go")
                .verbatim("share/types/response.go")
                .verbatim("share/middleware/trace.go")
                .verbatim("share/repository/base.go")
                .verbatim("share/repository/builder.go")
                .verbatim("share/repository/page.go")
                .verbatim("share/repository/queryable.go")
                .verbatim("share/repository/gorm/base_entity.go")
                .verbatim("share/repository/gorm/hooks.go")
                .verbatim("share/repository/gorm/factory.go")
                .render("share/repository/gorm/repository.go")
                .render("share/repository/gorm/queryable.go"),
        ];

        if features.example_module {
            plan.extend([
                StepPlan::new("Generate user/domain module")
                    .render("user/domain/go.mod")
                    .verbatim("user/domain/enum/user_status.go")
                    .render("user/domain/errors/user_error.go")
                    .render("user/domain/entity/user.go")
                    .render("user/domain/repository/user_repository.go")
                    .render("user/domain/service/user_domain_service.go")
                    .verbatim("user/domain/valueobject/email.go")
                    .verbatim("user/domain/valueobject/password.go")
                    .verbatim("user/domain/event/user_events.go"),
                StepPlan::new("Generate user/infrastructure module")
                    .render("user/infrastructure/go.mod")
                    .verbatim("user/infrastructure/entity/user_po.go")
                    .render("user/infrastructure/converter/user_converter.go")
                    .render("user/infrastructure/repository/user_repository_impl.go"),
                StepPlan::new("Generate user aggregate module").render("user/go.mod"),
                StepPlan::new("Generate api/user-api module")
                    .render("api/user-api/go.mod")
                    .render("api/user-api/dto/user_dto.go")
                    .render("api/user-api/service/user_app_service.go")
                    .render("api/user-api/http/user_handler.go"),
                StepPlan::new("Generate api aggregate module").render("api/go.mod"),
            ]);
        }

        plan.push(
            StepPlan::new("Generate cmd/api entrypoint")
                .render("cmd/api/go.mod")
                .render("cmd/api/main.go"),
        );

        if features.docker {
            plan.extend([
                StepPlan::new("Generate Dockerfile").render("Dockerfile"),
                StepPlan::new("Generate docker-compose.yml").render("docker-compose.yml"),
                StepPlan::new("Generate .dockerignore").verbatim(".dockerignore"),
            ]);
        }

        plan.push(StepPlan::new("Generate README.md").render("README.md"));
        plan
    }
}
