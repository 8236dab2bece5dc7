use super::types::{InternshipPosting, ScoreRange};

struct Seed {
    id: u32,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    skills: &'static [&'static str],
    range: (i32, i32),
    category: &'static str,
    description: &'static str,
}

const BUILTIN: &[Seed] = &[
    Seed {
        id: 9,
        title: "Backend Developer Intern",
        company: "CodeCrafters",
        location: "Remote",
        skills: &["Node.js", "Express", "PostgreSQL", "Docker"],
        range: (6, 8),
        category: "Backend Development",
        description: "Develop scalable backend services and work with APIs and database optimization.",
    },
    Seed {
        id: 10,
        title: "Frontend Developer Intern",
        company: "PixelSoft",
        location: "Pune, India",
        skills: &["React", "TypeScript", "TailwindCSS", "REST APIs"],
        range: (5, 7),
        category: "Frontend Development",
        description: "Work on responsive UI design and integrate APIs for a modern web experience.",
    },
    Seed {
        id: 11,
        title: "Cloud Engineering Intern",
        company: "Nimbus Systems",
        location: "Remote",
        skills: &["AWS", "Docker", "Kubernetes", "CI/CD"],
        range: (7, 9),
        category: "Cloud / DevOps",
        description: "Assist in deploying cloud-native applications and managing CI/CD pipelines.",
    },
    Seed {
        id: 12,
        title: "Mobile App Developer Intern",
        company: "AppWorks",
        location: "Hyderabad, India",
        skills: &["Flutter", "Firebase", "Dart", "Git"],
        range: (5, 7),
        category: "Mobile Development",
        description: "Develop cross-platform mobile apps and integrate backend APIs.",
    },
    Seed {
        id: 13,
        title: "AI Chatbot Intern",
        company: "DialogFlow Labs",
        location: "Bangalore, India",
        skills: &["Python", "NLP", "Transformers", "FastAPI"],
        range: (7, 9),
        category: "AI / ML / NLP",
        description: "Build and optimize conversational AI chatbots using NLP techniques.",
    },
    Seed {
        id: 14,
        title: "Data Engineering Intern",
        company: "DataForge",
        location: "Remote",
        skills: &["SQL", "ETL", "Python", "Apache Spark"],
        range: (6, 8),
        category: "Data Engineering",
        description: "Build and maintain data pipelines and support analytics teams.",
    },
    Seed {
        id: 15,
        title: "Cybersecurity Analyst Intern",
        company: "FortShield",
        location: "Mumbai, India",
        skills: &["SIEM Tools", "Threat Analysis", "Python", "Networking"],
        range: (6, 8),
        category: "Cybersecurity / InfoSec",
        description: "Assist in monitoring systems, analyzing threats, and drafting reports.",
    },
    Seed {
        id: 16,
        title: "Blockchain Developer Intern",
        company: "ChainTech",
        location: "Remote",
        skills: &["Solidity", "Ethereum", "Web3.js", "Smart Contracts"],
        range: (7, 9),
        category: "Blockchain",
        description: "Design and implement smart contracts and decentralized applications.",
    },
    Seed {
        id: 17,
        title: "Fullstack Intern",
        company: "NextGen Coders",
        location: "Delhi, India",
        skills: &["MERN Stack", "REST APIs", "GitHub Actions"],
        range: (6, 8),
        category: "Fullstack Development",
        description: "Contribute to fullstack projects with focus on performance and testing.",
    },
    Seed {
        id: 18,
        title: "AI Vision Intern",
        company: "VisionX Labs",
        location: "Remote",
        skills: &["OpenCV", "TensorFlow", "Deep Learning", "Python"],
        range: (7, 9),
        category: "AI / Computer Vision",
        description: "Work on computer vision models for object detection and recognition.",
    },
    Seed {
        id: 19,
        title: "DevOps Intern",
        company: "Pipeline.io",
        location: "Chennai, India",
        skills: &["Jenkins", "Docker", "Kubernetes", "Linux"],
        range: (6, 8),
        category: "DevOps / SRE",
        description: "Manage CI/CD pipelines, automate deployments, and support developers.",
    },
    Seed {
        id: 20,
        title: "Penetration Testing Intern",
        company: "HackLabs",
        location: "Remote",
        skills: &["Burp Suite", "OWASP", "Python", "Networking"],
        range: (7, 9),
        category: "Cybersecurity / Ethical Hacking",
        description: "Perform penetration tests, exploit simulations, and vulnerability reports.",
    },
];

/// The postings shipped with the client, in display order.
pub fn builtin_postings() -> Vec<InternshipPosting> {
    BUILTIN
        .iter()
        .filter_map(|seed| {
            // Seed ranges are literals with low <= high; a bad one is skipped rather than panicking
            let score_range = ScoreRange::new(seed.range.0, seed.range.1).ok()?;
            Some(InternshipPosting {
                id: seed.id,
                title: seed.title.to_string(),
                company: seed.company.to_string(),
                location: seed.location.to_string(),
                category: seed.category.to_string(),
                description: seed.description.to_string(),
                skills_required: seed.skills.iter().map(|s| s.to_string()).collect(),
                score_range,
            })
        })
        .collect()
}
