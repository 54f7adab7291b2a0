/// 协议相关的常量定义
///
/// 统一管理标记行、提示词模板等硬编码字符串

/// 字段标记
pub mod markers {
    pub const MARKER_PREFIX: &str = "[[[[ #### ";
    pub const MARKER_SUFFIX: &str = " #### ]]]]";

    /// 标记行正则（整行匹配，行首尾空白需先去除）
    pub const MARKER_REGEX: &str = r"^\[\[\[\[ #### (\w+) #### \]\]\]\]$";

    /// 每个 assistant 回合末尾追加的结束字段
    pub const COMPLETED_FIELD: &str = "completed";
}

/// 系统提示词片段
pub mod prompt {
    pub const INPUT_FIELDS_HEADER: &str = "Your input fields are:";
    pub const OUTPUT_FIELDS_HEADER: &str = "Your output fields are:";
    pub const STRUCTURE_INTRO: &str =
        "All interactions will be structured in the following way, with the appropriate values filled in.";
    pub const RESPONSE_RULE_PREFIX: &str = "You will receive some input fields in each interaction. Respond only with the corresponding output fields, starting with the field ";
    pub const RESPONSE_RULE_JOINER: &str = ", then ";
    pub const RESPONSE_RULE_SUFFIX: &str = ", and then ending with the marker for `completed`.";
    pub const OBJECTIVE_HEADER: &str = "In adhering to this structure, your objective is: ";
    pub const OBJECTIVE_INDENT: &str = "        ";
}

/// 图像相关常量
pub mod image {
    /// 默认的图像字段关键词
    pub const DEFAULT_IMAGE_KEYWORD: &str = "image";

    /// data URI 中声明的媒体类型
    pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
}

/// 环境变量名
pub mod env {
    pub const IMAGE_KEYWORD: &str = "FIELDMARK_IMAGE_KEYWORD";
    pub const IMAGE_MIME: &str = "FIELDMARK_IMAGE_MIME";
    pub const FETCH_TIMEOUT_SECS: &str = "FIELDMARK_FETCH_TIMEOUT_SECS";
    pub const DEBUG: &str = "FIELDMARK_DEBUG";
}
