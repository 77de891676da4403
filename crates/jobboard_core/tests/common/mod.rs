#![allow(dead_code)]

use jobboard_core::{Job, JobId};

pub fn init_logging() {
    jobboard_logging::initialize_for_tests();
}

pub fn job(id: JobId, company: &str, role: &str, tags: &[&str]) -> Job {
    Job {
        id,
        company: company.to_string(),
        logo: String::new(),
        is_new: false,
        is_featured: false,
        position: format!("{role} Developer"),
        role: role.to_string(),
        level: "Midweight".to_string(),
        posted_at: "1d ago".to_string(),
        contract: "Full Time".to_string(),
        location: "Remote".to_string(),
        languages: tags.iter().map(|tag| tag.to_string()).collect(),
        tools: Vec::new(),
    }
}

/// Small dataset mirroring the shape of the bundled one.
pub fn sample_jobs() -> Vec<Job> {
    let mut photosnap = job(1, "Photosnap", "Frontend", &["HTML", "CSS", "JavaScript"]);
    photosnap.position = "Senior Frontend Developer".to_string();
    photosnap.level = "Senior".to_string();
    photosnap.is_new = true;
    photosnap.is_featured = true;

    let mut manage = job(2, "Manage", "Fullstack", &["Python"]);
    manage.position = "Fullstack Developer".to_string();
    manage.tools = vec!["React".to_string()];
    manage.is_new = true;
    manage.is_featured = true;

    let mut account = job(3, "Account", "Frontend", &["JavaScript"]);
    account.position = "Junior Frontend Developer".to_string();
    account.level = "Junior".to_string();
    account.contract = "Part Time".to_string();
    account.tools = vec!["React".to_string(), "Sass".to_string()];
    account.is_new = true;

    let mut myhome = job(4, "MyHome", "Frontend", &["CSS", "JavaScript"]);
    myhome.position = "Junior Frontend Developer".to_string();
    myhome.level = "Junior".to_string();
    myhome.contract = "Contract".to_string();

    let mut loop_studios = job(5, "Loop Studios", "Fullstack", &["JavaScript"]);
    loop_studios.position = "Software Engineer".to_string();
    loop_studios.tools = vec!["Ruby".to_string(), "Sass".to_string()];

    vec![photosnap, manage, account, myhome, loop_studios]
}
