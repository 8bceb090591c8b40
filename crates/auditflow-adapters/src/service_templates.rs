//! Built-in service skeleton templates.
//!
//! Two fixed layouts ship with the tool:
//!
//! - `maven-service`: minimal Maven module with application, controller,
//!   and service classes plus a Dockerfile and `pom.xml`.
//! - `spring-boot-service`: the same module split into controller/model/
//!   service packages with Spring Boot wiring and resource files.
//!
//! Contents are plain placeholders; the scaffolder's job is the directory
//! tree, not the business logic inside it.

use auditflow_core::domain::{DomainError, ServiceDescriptor, SkeletonTemplate};

const APPLICATION_JAVA: &str = r#"package {{GROUP_ID}}.{{SERVICE_PACKAGE}};

public class {{SERVICE_CLASS}}ServiceApplication {
    public static void main(String[] args) {
        System.out.println("{{SERVICE_CLASS}} Service is running!");
    }
}
"#;

const CONTROLLER_JAVA: &str = r#"package {{GROUP_ID}}.{{SERVICE_PACKAGE}};

public class {{SERVICE_CLASS}}Controller {
    // Add controller logic here
}
"#;

const SERVICE_JAVA: &str = r#"package {{GROUP_ID}}.{{SERVICE_PACKAGE}};

public class {{SERVICE_CLASS}}Service {
    // Add service logic here
}
"#;

const DOCKERFILE: &str = r#"FROM openjdk:17-jdk-slim
COPY target/{{SERVICE_PACKAGE}}-0.0.1-SNAPSHOT.jar app.jar
ENTRYPOINT ["java", "-jar", "app.jar"]
"#;

const POM_XML: &str = r#"<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>
    <groupId>{{GROUP_ID}}</groupId>
    <artifactId>{{SERVICE_PACKAGE}}</artifactId>
    <version>0.0.1-SNAPSHOT</version>
    <dependencies>
        <!-- Add dependencies here -->
    </dependencies>
</project>
"#;

const BOOT_APPLICATION_JAVA: &str = r#"package {{GROUP_ID}}.{{SERVICE_PACKAGE}};

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;

@SpringBootApplication
public class {{SERVICE_CLASS}}ServiceApplication {

    public static void main(String[] args) {
        SpringApplication.run({{SERVICE_CLASS}}ServiceApplication.class, args);
    }
}
"#;

const BOOT_CONTROLLER_JAVA: &str = r#"package {{GROUP_ID}}.{{SERVICE_PACKAGE}}.controller;

public class {{SERVICE_CLASS}}Controller {

}
"#;

const BOOT_MODEL_JAVA: &str = r#"package {{GROUP_ID}}.{{SERVICE_PACKAGE}}.model;

public class {{SERVICE_CLASS}}Request {

}
"#;

const BOOT_SERVICE_JAVA: &str = r#"package {{GROUP_ID}}.{{SERVICE_PACKAGE}}.service;

public class {{SERVICE_CLASS}}Service {

}
"#;

/// Minimal Maven module layout.
pub fn maven_service() -> SkeletonTemplate {
    let pkg_dir = "src/main/java/{{GROUP_PATH}}/{{SERVICE_PACKAGE}}";
    SkeletonTemplate::new("maven-service", "Minimal Maven service module")
        .with_directory(pkg_dir)
        .with_file(
            format!("{pkg_dir}/{{{{SERVICE_CLASS}}}}ServiceApplication.java"),
            APPLICATION_JAVA,
        )
        .with_file(
            format!("{pkg_dir}/{{{{SERVICE_CLASS}}}}Controller.java"),
            CONTROLLER_JAVA,
        )
        .with_file(
            format!("{pkg_dir}/{{{{SERVICE_CLASS}}}}Service.java"),
            SERVICE_JAVA,
        )
        .with_file("Dockerfile", DOCKERFILE)
        .with_file("pom.xml", POM_XML)
}

/// Spring Boot module layout with controller/model/service packages.
pub fn spring_boot_service() -> SkeletonTemplate {
    let pkg_dir = "src/main/java/{{GROUP_PATH}}/{{SERVICE_PACKAGE}}";
    SkeletonTemplate::new(
        "spring-boot-service",
        "Spring Boot service module with layered packages",
    )
    .with_directory(format!("{pkg_dir}/controller"))
    .with_directory(format!("{pkg_dir}/model"))
    .with_directory(format!("{pkg_dir}/service"))
    .with_directory("src/main/resources")
    .with_file(
        format!("{pkg_dir}/{{{{SERVICE_CLASS}}}}ServiceApplication.java"),
        BOOT_APPLICATION_JAVA,
    )
    .with_file(
        format!("{pkg_dir}/controller/{{{{SERVICE_CLASS}}}}Controller.java"),
        BOOT_CONTROLLER_JAVA,
    )
    .with_file(
        format!("{pkg_dir}/model/{{{{SERVICE_CLASS}}}}Request.java"),
        BOOT_MODEL_JAVA,
    )
    .with_file(
        format!("{pkg_dir}/service/{{{{SERVICE_CLASS}}}}Service.java"),
        BOOT_SERVICE_JAVA,
    )
    .with_file("src/main/resources/application.properties", "# Application properties\n")
    .with_file("src/main/resources/logback-spring.xml", "<configuration></configuration>\n")
    .with_file("Dockerfile", "# Dockerfile for {{SERVICE_NAME}}\n")
    .with_file("pom.xml", POM_XML)
}

/// All built-in skeletons.
pub fn all_templates() -> Vec<SkeletonTemplate> {
    vec![maven_service(), spring_boot_service()]
}

/// Look up a built-in skeleton by id.
pub fn find_template(id: &str) -> Result<SkeletonTemplate, DomainError> {
    all_templates()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| DomainError::UnknownSkeleton { id: id.to_string() })
}

/// The stock multi-service project: payment, transaction, reconciliation.
pub fn default_descriptors() -> Vec<ServiceDescriptor> {
    // These names are validated at compile-time constants; construction
    // cannot fail.
    ["payment-service", "transaction-service", "reconciliation-service"]
        .into_iter()
        .filter_map(|name| ServiceDescriptor::from_name(name).ok())
        .collect()
}
