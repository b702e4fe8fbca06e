/// 必须全部完成的技能徽章（按官方顺序）
pub const SKILL_BADGES: [&str; 19] = [
    "The Basics of Google Cloud Compute [Skill Badge]",
    "Get Started with Cloud Storage [Skill Badge]",
    "Get Started with Pub/Sub [Skill Badge]",
    "Get Started with API Gateway [Skill Badge]",
    "Get Started with Looker [Skill Badge]",
    "Get Started with Dataplex [Skill Badge]",
    "Get Started with Google Workspace Tools [Skill Badge]",
    "App Building with AppSheet [Skill Badge]",
    "Develop with Apps Script and AppSheet [Skill Badge]",
    "Build a Website on Google Cloud [Skill Badge]",
    "Set Up a Google Cloud Network [Skill Badge]",
    "Store, Process, and Manage Data on Google Cloud - Console [Skill Badge]",
    "Cloud Run Functions: 3 Ways [Skill Badge]",
    "App Engine: 3 Ways [Skill Badge]",
    "Cloud Speech API: 3 Ways [Skill Badge]",
    "Monitoring in Google Cloud [Skill Badge]",
    "Analyze Speech and Language with Google APIs [Skill Badge]",
    "Prompt Design in Vertex AI [Skill Badge]",
    "Develop Gen AI Apps with Gemini and Streamlit [Skill Badge]",
];

/// 街机游戏，完成任意一个即可
pub const ARCADE_GAMES: [&str; 5] = [
    "Level 3: Google Cloud Adventures",
    "Diwali in The Arcade",
    "Level 3: Generative AI [Game]",
    "Level 2: Generative AI [Game]",
    "Level 1: Generative AI [Game]",
];

/// 目录种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// 技能徽章
    SkillBadge,
    /// 街机游戏
    ArcadeGame,
}

impl CatalogKind {
    /// 获取显示名称
    pub fn name(self) -> &'static str {
        match self {
            CatalogKind::SkillBadge => "技能徽章",
            CatalogKind::ArcadeGame => "街机游戏",
        }
    }

}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
