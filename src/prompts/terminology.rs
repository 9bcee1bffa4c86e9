//! 各阶段共用的台湾学术用语规范

/// 台湾设计研究用语与表达方式
pub const TAIWAN_USAGE: &str = r#"請使用台灣繁體中文撰寫，並遵循以下規範：

1. 使用台灣的設計研究用語：
   - 「設計思考」而非「设计思维」
   - 「使用者經驗」而非「用户体验」
   - 「介面設計」而非「界面设计」
   - 「互動設計」而非「交互设计」
   - 「設計實務」而非「设计实践」

2. 使用台灣的專業術語：
   - 「使用者」而非「用户」
   - 「介面」而非「界面」
   - 「互動」而非「交互」
   - 「設計流程」而非「设计流程」

3. 使用台灣的表達方式：
   - 「目前」而非「当前」
   - 「之後」而非「之后」
   - 「因此」而非「所以」
   - 「然而」而非「但是」
   - 「藉由」而非「通过」
   - 「根據」而非「按照」"#;

/// 标点符号规范
pub const PUNCTUATION: &str = r#"標點符號使用：
   - 使用「」作為中文引號
   - 使用『』作為引號中的引號
   - 書名號使用《》
   - 篇名號使用〈〉"#;

/// APA 第七版文中引用规范
pub const APA_CITATION: &str = r#"文獻引用規範：
   - 遵循 APA 第七版格式
   - 每個重要論點都需要文獻支持
   - 引用時要與論點緊密結合，避免過度堆砌文獻
   - 確保引用的文獻都列在參考文獻清單中
   - 引用格式：
     * 單一作者：王小明（2020）或（王小明，2020）
     * 兩位作者：王小明與李大華（2020）或（王小明、李大華，2020）
     * 三位以上作者：王小明等人（2020）或（王小明等人，2020）
     * 英文文獻比照中文格式，作者姓氏大寫"#;
