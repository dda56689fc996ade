//! Services for the shared catalog: customers, projects, tasks and task
//! templates.
//!
//! Archived customers and projects are hidden from every operation, so
//! they behave as deleted until restored in the database.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Customer, Page, PageRequest, Project, Task, TaskTemplate};
use crate::domain::ports::{
    CustomerFilter, CustomerRepository, ProjectFilter, ProjectRepository, TaskFilter, TaskRepository,
    TaskTemplateRepository,
};

pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, filter: CustomerFilter, page: PageRequest) -> DomainResult<Page<Customer>> {
        let filter = CustomerFilter {
            include_archived: false,
            ..filter
        };
        self.repository.list(filter, page).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Customer> {
        self.repository
            .get(id)
            .await?
            .filter(|c| !c.archived)
            .ok_or(DomainError::not_found("Customer", id))
    }

    pub async fn create(&self, customer: Customer) -> DomainResult<Customer> {
        customer.validate().map_err(DomainError::ValidationFailed)?;
        self.repository.create(&customer).await
    }

    pub async fn update(&self, customer: Customer) -> DomainResult<Customer> {
        self.get(customer.id).await?;
        customer.validate().map_err(DomainError::ValidationFailed)?;
        self.repository.update(&customer).await?;
        Ok(customer)
    }

    /// Delete a customer with its projects and their tasks.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.get(id).await?;
        self.repository.delete(id).await?;
        tracing::info!(customer_id = id, "deleted customer");
        Ok(())
    }
}

pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, filter: ProjectFilter, page: PageRequest) -> DomainResult<Page<Project>> {
        let filter = ProjectFilter {
            include_archived: false,
            ..filter
        };
        self.repository.list(filter, page).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Project> {
        self.repository
            .get(id)
            .await?
            .filter(|p| !p.archived)
            .ok_or(DomainError::not_found("Project", id))
    }

    pub async fn create(&self, project: Project) -> DomainResult<Project> {
        project.validate().map_err(DomainError::ValidationFailed)?;
        let created = self.repository.create(&project).await?;
        tracing::info!(project_id = created.id, tracker = ?created.tracker_type, "created project");
        Ok(created)
    }

    pub async fn update(&self, project: Project) -> DomainResult<Project> {
        self.get(project.id).await?;
        project.validate().map_err(DomainError::ValidationFailed)?;
        self.repository.update(&project).await?;
        Ok(project)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.get(id).await?;
        self.repository.delete(id).await
    }
}

pub struct TaskService<T: TaskRepository, TT: TaskTemplateRepository> {
    tasks: Arc<T>,
    templates: Arc<TT>,
}

impl<T: TaskRepository, TT: TaskTemplateRepository> TaskService<T, TT> {
    pub fn new(tasks: Arc<T>, templates: Arc<TT>) -> Self {
        Self { tasks, templates }
    }

    pub async fn list_tasks(&self, filter: TaskFilter, page: PageRequest) -> DomainResult<Page<Task>> {
        self.tasks.list(filter, page).await
    }

    pub async fn get_task(&self, id: i64) -> DomainResult<Task> {
        self.tasks.get(id).await?.ok_or(DomainError::not_found("Task", id))
    }

    pub async fn create_task(&self, task: Task) -> DomainResult<Task> {
        task.validate().map_err(DomainError::ValidationFailed)?;
        self.tasks.create(&task).await
    }

    pub async fn update_task(&self, task: Task) -> DomainResult<Task> {
        task.validate().map_err(DomainError::ValidationFailed)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    pub async fn delete_task(&self, id: i64) -> DomainResult<()> {
        self.tasks.delete(id).await
    }

    pub async fn list_templates(&self, page: PageRequest) -> DomainResult<Page<TaskTemplate>> {
        self.templates.list(page).await
    }

    pub async fn get_template(&self, id: i64) -> DomainResult<TaskTemplate> {
        self.templates
            .get(id)
            .await?
            .ok_or(DomainError::not_found("TaskTemplate", id))
    }

    pub async fn create_template(&self, template: TaskTemplate) -> DomainResult<TaskTemplate> {
        template.validate().map_err(DomainError::ValidationFailed)?;
        self.templates.create(&template).await
    }

    pub async fn update_template(&self, template: TaskTemplate) -> DomainResult<TaskTemplate> {
        template.validate().map_err(DomainError::ValidationFailed)?;
        self.templates.update(&template).await?;
        Ok(template)
    }

    pub async fn delete_template(&self, id: i64) -> DomainResult<()> {
        self.templates.delete(id).await
    }
}
