//! TODO markdown rendering
//!
//! Pure and deterministic: the same document always renders to the same
//! string. Counts in the summary sections are recomputed from the task list.

use crate::models::{GlobalConsiderations, ImplementationGuide, Priority, Task, TodoDocument};

/// Render a TODO document as markdown
pub fn render_todo_markdown(todo: &TodoDocument) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", todo.project.name));
    md.push_str(&format!("**Version:** {}\n\n", todo.project.version));
    md.push_str(&format!("{}\n\n", todo.project.description));

    push_table_of_contents(&mut md);

    md.push_str("## 프로젝트 개요\n\n");
    md.push_str(&format!("{}\n\n", todo.project.description));

    md.push_str("### 프로젝트 현황\n\n");
    md.push_str(&format!("- **전체 작업:** {}개\n", todo.total_tasks()));
    md.push_str(&format!("- **세부 작업:** {}개\n\n", todo.total_subtasks()));

    md.push_str("### 우선순위별 작업 분포\n\n");
    for priority in Priority::ALL {
        md.push_str(&format!(
            "- **{} ({}):** {}개\n",
            priority,
            priority.label(),
            todo.count_by_priority(priority)
        ));
    }
    md.push('\n');

    md.push_str("## 작업 목록\n\n");
    for task in &todo.tasks {
        push_task(&mut md, task);
    }

    md.push_str("## 구현 가이드\n\n");
    for guide in &todo.implementation_guides {
        push_guide(&mut md, guide);
    }

    push_considerations(&mut md, &todo.global_considerations);

    md.push_str("## 실행 순서\n\n");
    md.push_str(&format!("**요약:** {}\n\n", todo.execution_order.summary));
    for (i, phase) in todo.execution_order.phases.iter().enumerate() {
        md.push_str(&format!("### 단계 {}: {}\n\n", i + 1, phase.phase_name));
        md.push_str(&format!("{}\n\n", phase.description));
        md.push_str("**포함 작업:**\n");
        push_list(&mut md, &phase.task_ids);
        md.push('\n');
    }

    md.push_str("## 메타데이터\n\n");
    md.push_str(&format!("- **작성자:** {}\n", todo.metadata.author));
    md.push_str(&format!("- **버전:** {}\n", todo.metadata.version));
    md.push_str(&format!("- **생성일:** {}\n", todo.metadata.created_at));
    md.push_str(&format!("- **수정일:** {}\n", todo.metadata.updated_at));

    md
}

fn push_table_of_contents(md: &mut String) {
    md.push_str("## 목차\n\n");
    md.push_str("- [프로젝트 개요](#프로젝트-개요)\n");
    md.push_str("  - [프로젝트 현황](#프로젝트-현황)\n");
    md.push_str("  - [우선순위별 작업 분포](#우선순위별-작업-분포)\n");
    md.push_str("- [작업 목록](#작업-목록)\n");
    md.push_str("- [구현 가이드](#구현-가이드)\n");
    md.push_str("- [전역 고려사항](#전역-고려사항)\n");
    md.push_str("- [실행 순서](#실행-순서)\n");
    md.push_str("- [메타데이터](#메타데이터)\n\n");
}

fn push_task(md: &mut String, task: &Task) {
    md.push_str(&format!("### {} ({})\n\n", task.title, task.id));
    md.push_str(&format!("- **우선순위:** {}\n", task.priority));
    md.push_str(&format!("- **상태:** {}\n", task.status));
    md.push_str(&format!("- **실행 순서:** {}\n\n", task.order));
    md.push_str(&format!("**설명:**\n{}\n\n", task.description));

    if !task.dependencies.is_empty() {
        md.push_str("**종속성:**\n");
        push_list(md, &task.dependencies);
        md.push('\n');
    }

    if !task.files.is_empty() {
        md.push_str("**관련 파일:**\n");
        for file in &task.files {
            md.push_str(&format!(
                "- `{}` ({}): {}\n",
                file.path, file.change_type, file.description
            ));
        }
        md.push('\n');
    }

    if !task.subtasks.is_empty() {
        md.push_str("**세부 작업:**\n\n");
        for subtask in &task.subtasks {
            md.push_str(&format!("#### {} ({})\n\n", subtask.title, subtask.id));
            md.push_str(&format!("- **카테고리:** {}\n", subtask.category));
            md.push_str(&format!("**설명:** {}\n\n", subtask.description));

            if !subtask.implementation_notes.is_empty() {
                md.push_str("**구현 참고사항:**\n");
                push_list(md, &subtask.implementation_notes);
                md.push('\n');
            }
        }
    }

    if !task.completion_criteria.is_empty() {
        md.push_str("**완료 기준:**\n");
        push_list(md, &task.completion_criteria);
        md.push('\n');
    }

    if !task.risks.is_empty() {
        md.push_str("**위험 요소:**\n");
        for risk in &task.risks {
            md.push_str(&format!("- **위험:** {}\n", risk.risk));
            md.push_str(&format!("- **완화 방안:** {}\n\n", risk.mitigation));
        }
    }

    md.push_str("---\n\n");
}

fn push_guide(md: &mut String, guide: &ImplementationGuide) {
    md.push_str(&format!("### {} ({})\n\n", guide.title, guide.id));
    md.push_str(&format!("**카테고리:** {}\n\n", guide.category));
    md.push_str(&format!("{}\n\n", guide.content));

    if !guide.related_tasks.is_empty() {
        md.push_str("**관련 작업:**\n");
        push_list(md, &guide.related_tasks);
        md.push('\n');
    }

    if !guide.code_examples.is_empty() {
        md.push_str("**코드 예시:**\n\n");
        for example in &guide.code_examples {
            md.push_str(&format!("**{}**\n\n", example.description));
            md.push_str(&format!("```{}\n", example.language));
            md.push_str(&format!("{}\n", example.code));
            md.push_str("```\n\n");
        }
    }

    md.push_str("---\n\n");
}

fn push_considerations(md: &mut String, considerations: &GlobalConsiderations) {
    md.push_str("## 전역 고려사항\n\n");

    let sections: [(&str, &[String]); 5] = [
        ("브라우저 호환성", &considerations.browser_compatibility),
        ("성능 요구사항", &considerations.performance_requirements),
        ("접근성 표준", &considerations.accessibility_standards),
        ("오류 처리 정책", &considerations.error_handling_policies),
        ("메모리 관리", &considerations.memory_management),
    ];

    for (title, items) in sections {
        md.push_str(&format!("### {}\n", title));
        push_list(md, items);
        md.push('\n');
    }
}

fn push_list(md: &mut String, items: &[String]) {
    for item in items {
        md.push_str(&format!("- {}\n", item));
    }
}
