//! Built-in seed data.
//!
//! Used whenever a collection key is absent from storage or fails to
//! deserialize. Project aggregates are normalized against the seed tasks at
//! construction time, so the derived fields start out consistent no matter
//! what the literals below say.

use chrono::NaiveDate;

use crate::model::{
    Project, ProjectStatus, Task, TaskPriority, TaskStatus, User, UserRole, UserStatus,
};
use crate::stats;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn user(id: &str, name: &str, email: &str, role: UserRole, avatar: u8) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar_url: format!("https://i.pravatar.cc/150?img={avatar}"),
        status: UserStatus::Active,
    }
}

/// The seed user collection
pub fn users() -> Vec<User> {
    vec![
        user("user-1", "John Parker", "john@example.com", UserRole::Admin, 1),
        user("user-2", "Mary Lowell", "mary@example.com", UserRole::Manager, 2),
        user("user-3", "Carl Graham", "carl@example.com", UserRole::Developer, 3),
        user("user-4", "Anna Foster", "anna@example.com", UserRole::Designer, 4),
        user("user-5", "Louis Martin", "louis@example.com", UserRole::Developer, 5),
    ]
}

/// The seed project collection, aggregates normalized against the seed tasks
pub fn projects() -> Vec<Project> {
    let mut projects = vec![
        Project {
            id: "proj-1".to_string(),
            name: "Mobile App Development".to_string(),
            description: "Task management application for mobile devices.".to_string(),
            status: ProjectStatus::Active,
            progress: 0,
            start_date: date(2024, 1, 15),
            end_date: date(2024, 6, 30),
            team_members: vec![
                "user-1".to_string(),
                "user-2".to_string(),
                "user-3".to_string(),
            ],
            tasks_count: 0,
            completed_tasks_count: 0,
        },
        Project {
            id: "proj-2".to_string(),
            name: "Corporate Website Redesign".to_string(),
            description: "Full refresh of the company website.".to_string(),
            status: ProjectStatus::OnHold,
            progress: 0,
            start_date: date(2024, 3, 1),
            end_date: date(2024, 9, 15),
            team_members: vec!["user-2".to_string(), "user-4".to_string()],
            tasks_count: 0,
            completed_tasks_count: 0,
        },
        Project {
            id: "proj-3".to_string(),
            name: "CRM Rollout".to_string(),
            description: "Integration of a new CRM system for sales.".to_string(),
            status: ProjectStatus::Pending,
            progress: 0,
            start_date: date(2024, 7, 1),
            end_date: date(2024, 12, 31),
            team_members: vec!["user-1".to_string(), "user-5".to_string()],
            tasks_count: 0,
            completed_tasks_count: 0,
        },
        Project {
            id: "proj-4".to_string(),
            name: "Digital Marketing Campaign".to_string(),
            description: "Launch of a new social media campaign.".to_string(),
            status: ProjectStatus::Completed,
            progress: 0,
            start_date: date(2023, 11, 1),
            end_date: date(2024, 2, 28),
            team_members: vec!["user-2".to_string(), "user-4".to_string()],
            tasks_count: 0,
            completed_tasks_count: 0,
        },
    ];

    let tasks = tasks();
    for project in &mut projects {
        let aggregates = stats::project_task_stats(&tasks, &project.id);
        project.tasks_count = aggregates.tasks_count;
        project.completed_tasks_count = aggregates.completed_tasks_count;
        project.progress = aggregates.progress;
    }
    projects
}

/// The seed task collection
pub fn tasks() -> Vec<Task> {
    vec![
        Task {
            id: "task-1".to_string(),
            project_id: "proj-1".to_string(),
            name: "User Interface Design".to_string(),
            description: "Wireframes and mockups for the mobile app.".to_string(),
            status: TaskStatus::Completed,
            priority: TaskPriority::High,
            assigned_to: "user-4".to_string(),
            due_date: date(2024, 2, 28),
            created_at: date(2024, 1, 20),
        },
        Task {
            id: "task-2".to_string(),
            project_id: "proj-1".to_string(),
            name: "Login Frontend".to_string(),
            description: "Implement the login and signup screens.".to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            assigned_to: "user-3".to_string(),
            due_date: date(2024, 6, 15),
            created_at: date(2024, 3, 10),
        },
        Task {
            id: "task-3".to_string(),
            project_id: "proj-1".to_string(),
            name: "Database Setup".to_string(),
            description: "Provision and configure the application database.".to_string(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            assigned_to: "user-5".to_string(),
            due_date: date(2024, 6, 30),
            created_at: date(2024, 5, 1),
        },
        Task {
            id: "task-4".to_string(),
            project_id: "proj-2".to_string(),
            name: "Content Audit".to_string(),
            description: "Review and catalogue the existing site content.".to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::Medium,
            assigned_to: "user-2".to_string(),
            due_date: date(2024, 7, 30),
            created_at: date(2024, 4, 5),
        },
        Task {
            id: "task-5".to_string(),
            project_id: "proj-4".to_string(),
            name: "Social Media Creatives".to_string(),
            description: "Design images and videos for the campaign.".to_string(),
            status: TaskStatus::Completed,
            priority: TaskPriority::High,
            assigned_to: "user-4".to_string(),
            due_date: date(2024, 1, 10),
            created_at: date(2023, 11, 15),
        },
        Task {
            id: "task-6".to_string(),
            project_id: "proj-4".to_string(),
            name: "Post Scheduling".to_string(),
            description: "Schedule the campaign posts.".to_string(),
            status: TaskStatus::Completed,
            priority: TaskPriority::Medium,
            assigned_to: "user-2".to_string(),
            due_date: date(2024, 1, 25),
            created_at: date(2023, 12, 1),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_references_are_consistent() {
        let users = users();
        let projects = projects();
        let tasks = tasks();

        for task in &tasks {
            assert!(
                projects.iter().any(|project| project.id == task.project_id),
                "task {} references unknown project {}",
                task.id,
                task.project_id
            );
            assert!(
                users.iter().any(|user| user.id == task.assigned_to),
                "task {} assigned to unknown user {}",
                task.id,
                task.assigned_to
            );
        }
        for project in &projects {
            for member in &project.team_members {
                assert!(users.iter().any(|user| &user.id == member));
            }
        }
    }

    #[test]
    fn seed_aggregates_match_the_seed_tasks() {
        for project in projects() {
            let aggregates = stats::project_task_stats(&tasks(), &project.id);
            assert_eq!(project.tasks_count, aggregates.tasks_count);
            assert_eq!(project.completed_tasks_count, aggregates.completed_tasks_count);
            assert_eq!(project.progress, aggregates.progress);
            assert!(project.completed_tasks_count <= project.tasks_count);
        }
    }
}
